use crate::app_context::AppContext;
use crate::thumbnails::errors::ThumbnailError;
use crate::thumbnails::fetch;
use crate::thumbnails::img;
use crate::thumbnails::requests::ThumbnailRequest;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use http::{header, Method, StatusCode};

#[axum::debug_handler]
pub async fn thumbnail(
    State(app_context): State<AppContext>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ThumbnailError> {
    let request = ThumbnailRequest::from_json(&body?)?;
    let url = request.url()?;

    let image_bytes = fetch::fetch_image(
        &app_context.http_client,
        url,
        app_context.config.max_image_bytes,
    )
    .await?;

    let max_dimension = app_context.config.max_image_dimension;
    let jpeg_bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ThumbnailError> {
        let decoded_image = img::decode(&image_bytes, max_dimension)?;
        tracing::debug!(
            format = decoded_image.format_name(),
            width = decoded_image.width(),
            height = decoded_image.height(),
            "Decoded source image."
        );
        let thumbnail = img::resize(&decoded_image.image, max_dimension);
        Ok(img::encode_jpeg(&thumbnail)?)
    })
    .await??;

    tracing::info!(link = %request.link, size = jpeg_bytes.len(), "Thumbnail has been sent.");
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/jpeg")],
        jpeg_bytes,
    ))
}

pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    tracing::warn!(
        stage = "request_decoder",
        http_method = %method,
        "Method not allowed."
    );
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, Method::POST.as_str())],
    )
}
