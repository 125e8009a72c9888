//! Tests for error types

use super::*;

#[test]
fn test_invalid_value_message_names_variable() {
    let error = ConfigError::InvalidValue {
        name: "PORT",
        value: "eighty".to_string(),
        reason: "invalid digit found in string".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Invalid value 'eighty' for PORT: invalid digit found in string"
    );
}

#[test]
fn test_status_error_reports_code() {
    let error = SinkError::Status {
        status: 502,
        body: "bad gateway".to_string(),
    };

    assert_eq!(error.status_code(), Some(502));
    assert_eq!(error.to_string(), "Destination returned HTTP 502: bad gateway");
}

#[test]
fn test_timeout_error_has_no_status() {
    let error = SinkError::Timeout(Duration::from_secs(5));

    assert_eq!(error.status_code(), None);
    assert!(error.to_string().contains("5s"));
}

#[tokio::test]
async fn test_panicked_task_has_no_status() {
    let join_error = tokio::spawn(async { panic!("sink exploded") })
        .await
        .unwrap_err();

    let error = SinkError::from(join_error);

    assert_eq!(error.status_code(), None);
    assert!(error.to_string().starts_with("Delivery task failed"));
}
