//! Integration tests for the health endpoint.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_reports_store() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], "memory");
    assert_eq!(response.body["store_reachable"], true);
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/nope").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
