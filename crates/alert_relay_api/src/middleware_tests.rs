//! Tests for middleware module

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceExt; // for `oneshot`

/// Test helper: create a simple handler that returns OK
async fn test_handler() -> &'static str {
    "OK"
}

#[test]
fn test_redact_path_hides_intake_secret() {
    assert_eq!(redact_path("/tv/my-secret"), "/tv/***");
    assert_eq!(redact_path("/tv/a/b/c"), "/tv/***");
    assert_eq!(redact_path("/tv/"), "/tv/***");
}

#[test]
fn test_redact_path_keeps_other_paths() {
    assert_eq!(redact_path("/health"), "/health");
    assert_eq!(redact_path("/"), "/");
    assert_eq!(redact_path("/tv"), "/tv");
    assert_eq!(redact_path("/other/tv/x"), "/other/tv/x");
}

#[tokio::test]
async fn test_tracing_middleware_adds_request_id() {
    let app = Router::new()
        .route("/test", get(test_handler))
        .layer(middleware::from_fn(tracing_middleware));

    let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .expect("Response should carry a request id")
        .to_str()
        .unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn test_request_ids_are_unique() {
    let app = Router::new()
        .route("/test", get(test_handler))
        .layer(middleware::from_fn(tracing_middleware));

    let first = app
        .clone()
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let second = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_ne!(
        first.headers().get(REQUEST_ID_HEADER),
        second.headers().get(REQUEST_ID_HEADER)
    );
}
