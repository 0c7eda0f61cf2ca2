use crate::app_context::AppContext;
use crate::cli::Args;
use crate::{http::middleware, thumbnails};
use axum::{routing::post, Router};
use tower::ServiceBuilder;
use tower_http::timeout::{RequestBodyTimeoutLayer, ResponseBodyTimeoutLayer};

pub fn new(args: &Args, app_context: AppContext) -> Router {
    let timeouts = ServiceBuilder::new()
        .layer(RequestBodyTimeoutLayer::new(args.read_timeout()))
        .layer(ResponseBodyTimeoutLayer::new(args.write_timeout()));
    tracing::info!(
        read_timeout_secs = args.read_timeout_secs,
        write_timeout_secs = args.write_timeout_secs,
        "Initialized HTTP configuration."
    );

    Router::new()
        .route(
            "/thmbnl",
            post(thumbnails::handlers::thumbnail)
                .fallback(thumbnails::handlers::method_not_allowed),
        )
        .with_state(app_context)
        .layer(timeouts)
        .layer(axum::middleware::from_fn(middleware::tracing))
}
