//! Tests for payload normalization

use super::*;
use serde_json::json;

/// The JSON document a sink receives for `payload`.
fn sent_json(payload: &AlertPayload) -> Value {
    serde_json::to_value(payload).unwrap()
}

#[test]
fn test_empty_body_becomes_empty_object() {
    let payload = AlertPayload::from_body(b"");

    assert_eq!(payload, AlertPayload::Structured(json!({})));
    assert_eq!(payload.to_compact_json(), "{}");
}

#[test]
fn test_json_object_is_kept_verbatim() {
    let body = br#"{"ticker":"BTC","price":64000.5,"tags":["a","b"],"meta":{"tf":"1h"}}"#;
    let payload = AlertPayload::from_body(body);

    assert!(!payload.is_raw());
    assert_eq!(
        sent_json(&payload),
        json!({"ticker": "BTC", "price": 64000.5, "tags": ["a", "b"], "meta": {"tf": "1h"}})
    );
}

#[test]
fn test_object_key_order_is_preserved() {
    let body = br#"{"zeta":1,"alpha":2,"mid":3}"#;
    let payload = AlertPayload::from_body(body);

    assert_eq!(payload.to_compact_json(), r#"{"zeta":1,"alpha":2,"mid":3}"#);
}

#[test]
fn test_non_object_json_values_are_accepted() {
    assert_eq!(sent_json(&AlertPayload::from_body(b"[1,2,3]")), json!([1, 2, 3]));
    assert_eq!(sent_json(&AlertPayload::from_body(b"42")), json!(42));
    assert_eq!(sent_json(&AlertPayload::from_body(b"\"buy\"")), json!("buy"));
    assert_eq!(sent_json(&AlertPayload::from_body(b"null")), Value::Null);
    assert_eq!(sent_json(&AlertPayload::from_body(b"true")), json!(true));
}

#[test]
fn test_plain_text_is_wrapped_as_raw() {
    let payload = AlertPayload::from_body(b"not-json");

    assert!(payload.is_raw());
    assert_eq!(sent_json(&payload), json!({"raw": "not-json"}));
    assert_eq!(payload.to_compact_json(), r#"{"raw":"not-json"}"#);
}

#[test]
fn test_truncated_json_is_wrapped_as_raw() {
    let payload = AlertPayload::from_body(br#"{"ticker":"BTC""#);

    assert_eq!(payload, AlertPayload::Raw(r#"{"ticker":"BTC""#.to_string()));
}

#[test]
fn test_whitespace_only_body_is_wrapped_as_raw() {
    let payload = AlertPayload::from_body(b"  \n");

    assert_eq!(sent_json(&payload), json!({"raw": "  \n"}));
}

#[test]
fn test_trailing_garbage_is_not_json() {
    let payload = AlertPayload::from_body(b"{} extra");

    assert!(payload.is_raw());
}

#[test]
fn test_invalid_utf8_is_replaced_in_raw_text() {
    let payload = AlertPayload::from_body(&[b'o', b'k', 0xff]);

    assert_eq!(payload, AlertPayload::Raw("ok\u{FFFD}".to_string()));
}
