//! Tests for error handling and HTTP conversion

use super::*;
use axum::http::header;

async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_forbidden_response() {
    let response = ApiError::Forbidden.into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"ok": false, "error": "Forbidden"})
    );
}

#[tokio::test]
async fn test_payload_too_large_response() {
    let response = ApiError::PayloadTooLarge.into_response();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"ok": false, "error": "Payload too large"})
    );
}

#[tokio::test]
async fn test_not_found_response() {
    let response = ApiError::NotFound.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"ok": false, "error": "Not found"})
    );
}

#[tokio::test]
async fn test_internal_error_hides_detail() {
    let response = ApiError::internal("database password is hunter2").into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"ok": false, "error": "Server error"}));
    assert!(!json.to_string().contains("hunter2"));
}

#[test]
fn test_status_mapping() {
    assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(ApiError::PayloadTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        ApiError::internal("x").status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
