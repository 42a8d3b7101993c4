//! Health endpoints and response headers.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use tower::ServiceExt;

use larder_integration_tests::{TestApp, body_text, get};

#[tokio::test]
async fn test_liveness() {
    let app = TestApp::new();

    let response = app.router.clone().oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_without_database_is_503() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(get("/health/ready", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let app = TestApp::new();

    let response = app.router.clone().oneshot(get("/health", None)).await.unwrap();

    let headers = response.headers();
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_static_assets_served() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(get("/static/css/main.css", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
