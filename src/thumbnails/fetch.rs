use reqwest::{Client, StatusCode};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to send request: {0}")]
    Send(#[source] reqwest::Error),
    #[error("upstream responded with status {0}")]
    Status(StatusCode),
    #[error("upstream body exceeds the maximum of {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("failed to read upstream body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Downloads `url` into memory, refusing bodies larger than `max_bytes`.
pub async fn fetch_image(
    client: &Client,
    url: Url,
    max_bytes: u64,
) -> Result<Vec<u8>, FetchError> {
    let mut response = client.get(url).send().await.map_err(FetchError::Send)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    if response
        .content_length()
        .is_some_and(|content_length| content_length > max_bytes)
    {
        return Err(FetchError::TooLarge { limit: max_bytes });
    }

    // Stream the body so an oversized or lying upstream is cut off early.
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(FetchError::Body)? {
        if (body.len() + chunk.len()) as u64 > max_bytes {
            return Err(FetchError::TooLarge { limit: max_bytes });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
