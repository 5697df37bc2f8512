//! Integration test for the root-level health endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get_req};

#[tokio::test]
async fn test_health_check() {
    let app = build_test_app("http://127.0.0.1:9");
    let response = get_req(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].as_str().is_some());
}
