//! Tests for response models

use super::*;

#[test]
fn test_ack_response_serialization() {
    let json = serde_json::to_string(&AckResponse::accepted()).unwrap();
    assert_eq!(json, r#"{"ok":true}"#);
}

#[test]
fn test_error_response_serialization() {
    let json = serde_json::to_string(&ErrorResponse::new("Forbidden")).unwrap();
    assert_eq!(json, r#"{"ok":false,"error":"Forbidden"}"#);
}

#[test]
fn test_health_response_field_order() {
    let response = HealthResponse {
        ok: true,
        service: "tv-webhook".to_string(),
        time: "2025-11-12T10:30:00.000Z".to_string(),
    };

    let json = serde_json::to_string(&response).unwrap();
    assert_eq!(
        json,
        r#"{"ok":true,"service":"tv-webhook","time":"2025-11-12T10:30:00.000Z"}"#
    );
}
