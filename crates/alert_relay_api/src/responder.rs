//! JSON response writer
//!
//! Every response produced by this service, success or error, goes through
//! [`JsonReply`]. Handlers return a single value that is converted into exactly
//! one HTTP response, so writing twice is impossible by construction.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[cfg(test)]
#[path = "responder_tests.rs"]
mod tests;

/// Content type of every response body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body sent if a response value cannot be serialized.
const SERIALIZATION_FAILURE_BODY: &str = r#"{"ok":false,"error":"Server error"}"#;

/// A status code paired with a value serialized as compact JSON.
#[derive(Debug, Clone)]
pub struct JsonReply<T> {
    pub status: StatusCode,
    pub body: T,
}

impl<T: Serialize> JsonReply<T> {
    pub fn new(status: StatusCode, body: T) -> Self {
        Self { status, body }
    }

    /// 200 OK with the given body.
    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

impl<T: Serialize> IntoResponse for JsonReply<T> {
    fn into_response(self) -> Response {
        let (status, bytes) = match serde_json::to_vec(&self.body) {
            Ok(bytes) => (self.status, bytes),
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize response body");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERIALIZATION_FAILURE_BODY.as_bytes().to_vec(),
                )
            }
        };

        (
            status,
            [
                (header::CONTENT_TYPE, JSON_CONTENT_TYPE),
                (header::CACHE_CONTROL, "no-store"),
            ],
            bytes,
        )
            .into_response()
    }
}
