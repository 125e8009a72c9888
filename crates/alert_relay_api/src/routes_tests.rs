//! Tests for routes module

use super::*;
use alert_relay_core::{RelayConfig, SinkSet};
use axum::{body::Body, http::StatusCode};
use tower::ServiceExt;

fn test_router() -> Router {
    let config = RelayConfig::default().with_secret("abc");
    let sinks = SinkSet::new(config.sink_timeout);
    create_router(AppState::new(config, sinks))
}

async fn status_of(method: &str, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    test_router().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_known_routes_resolve() {
    assert_eq!(status_of("GET", "/").await, StatusCode::OK);
    assert_eq!(status_of("GET", "/health").await, StatusCode::OK);
    assert_eq!(status_of("POST", "/tv/abc").await, StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    assert_eq!(status_of("GET", "/tv/abc").await, StatusCode::NOT_FOUND);
    assert_eq!(status_of("GET", "/tv/").await, StatusCode::NOT_FOUND);
    assert_eq!(status_of("POST", "/health").await, StatusCode::NOT_FOUND);
    assert_eq!(status_of("POST", "/").await, StatusCode::NOT_FOUND);
    assert_eq!(status_of("DELETE", "/health").await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_head_is_not_treated_as_get() {
    assert_eq!(status_of("HEAD", "/").await, StatusCode::NOT_FOUND);
    assert_eq!(status_of("HEAD", "/health").await, StatusCode::NOT_FOUND);
    assert_eq!(status_of("HEAD", "/tv/abc").await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_paths_are_not_found() {
    assert_eq!(status_of("POST", "/other").await, StatusCode::NOT_FOUND);
    assert_eq!(status_of("GET", "/healthz").await, StatusCode::NOT_FOUND);
    assert_eq!(status_of("POST", "/tv").await, StatusCode::NOT_FOUND);
    assert_eq!(status_of("POST", "/api/tv/abc").await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_query_string_is_ignored_for_routing() {
    assert_eq!(status_of("GET", "/health?probe=1").await, StatusCode::OK);
}
