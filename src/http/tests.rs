use crate::app_context::{AppContext, ThumbnailConfig};
use crate::cli::tests::fake_args;
use crate::http::middleware::whole_millis;
use crate::http::router;
use axum_test::TestServer;
use std::time::Duration;

pub fn test_server() -> TestServer {
    let args = fake_args();
    // Fixtures live on localhost, keep any proxy from the environment out of the way.
    let http_client = reqwest::Client::builder()
        .no_proxy()
        .timeout(args.fetch_timeout().expect("Fake args must set a fetch timeout."))
        .build()
        .expect("Failed to build HTTP client.");
    let app_context = AppContext::new(ThumbnailConfig::from(&args), http_client);
    let router = router::new(&args, app_context);
    TestServer::new(router).expect("Failed to run test server.")
}

#[test]
fn test_whole_millis_saturates() {
    assert_eq!(whole_millis(Duration::from_micros(2_500)), 2);
    assert_eq!(whole_millis(Duration::MAX), u64::MAX);
}
