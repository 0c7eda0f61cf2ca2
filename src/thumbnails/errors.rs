use crate::thumbnails::fetch::FetchError;
use crate::thumbnails::img::{DecodeError, EncodeError};
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio::task::JoinError;

/// Everything that can stop a thumbnail request short of a `200`.
#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("failed to read request body: {0}")]
    UnreadableBody(#[from] BytesRejection),
    #[error("failed to parse request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("request body has no `link`")]
    MissingLink,
    #[error("`{link}` is not an absolute http(s) URL")]
    InvalidLink { link: String },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("image processing task failed: {0}")]
    Worker(#[from] JoinError),
}

impl ThumbnailError {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::UnreadableBody(_)
            | Self::MalformedBody(_)
            | Self::MissingLink
            | Self::InvalidLink { .. } => "request_decoder",
            Self::Fetch(_) | Self::Decode(_) => "image_fetcher",
            Self::Encode(_) | Self::Worker(_) => "resizer_encoder",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnreadableBody(_)
            | Self::MalformedBody(_)
            | Self::MissingLink
            | Self::InvalidLink { .. } => StatusCode::BAD_REQUEST,
            Self::Fetch(_) | Self::Decode(_) => StatusCode::BAD_GATEWAY,
            Self::Encode(_) | Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the client. Upstream details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::UnreadableBody(_) => "Unreadable request body",
            Self::MalformedBody(_) => "Request body must be a JSON object with a `link` string",
            Self::MissingLink => "Missing `link`",
            Self::InvalidLink { .. } => "`link` must be an absolute http(s) URL",
            Self::Fetch(FetchError::TooLarge { .. }) => "Image is too large",
            Self::Fetch(_) => "Failed to fetch image",
            Self::Decode(_) => "Failed to decode image",
            Self::Encode(_) | Self::Worker(_) => "Failed to produce thumbnail",
        }
    }
}

impl IntoResponse for ThumbnailError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                stage = self.stage(),
                status = status.as_u16(),
                error = %self,
                "Thumbnail request failed."
            );
        } else {
            tracing::warn!(
                stage = self.stage(),
                status = status.as_u16(),
                error = %self,
                "Thumbnail request rejected."
            );
        }
        (status, self.public_message()).into_response()
    }
}
