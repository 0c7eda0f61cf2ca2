use crate::cli::Args;
use std::sync::Arc;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ThumbnailConfig>,
    pub http_client: reqwest::Client,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailConfig {
    /// Largest upstream body the fetcher will buffer, in bytes.
    pub max_image_bytes: u64,
    /// Largest accepted source width and height, in pixels.
    pub max_image_dimension: u32,
}

impl From<&Args> for ThumbnailConfig {
    fn from(args: &Args) -> Self {
        Self {
            max_image_bytes: args.max_image_bytes,
            max_image_dimension: args.max_image_dimension,
        }
    }
}

impl AppContext {
    pub fn new(config: ThumbnailConfig, http_client: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            http_client,
        }
    }
}

pub fn init(args: &Args) -> Result<AppContext, reqwest::Error> {
    let mut client_builder = reqwest::Client::builder();
    if let Some(fetch_timeout) = args.fetch_timeout() {
        client_builder = client_builder.timeout(fetch_timeout);
    }
    let http_client = client_builder.build()?;
    tracing::info!("Initialized HTTP client.");
    Ok(AppContext::new(ThumbnailConfig::from(args), http_client))
}
