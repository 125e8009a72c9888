//! HTTP response type definitions
//!
//! Every body carries an `ok` flag. Successful responses set it to `true`;
//! error responses set it to `false` and add a short `error` string.

use serde::{Deserialize, Serialize};

/// Health check response.
///
/// # Example
///
/// ```json
/// { "ok": true, "service": "tv-webhook", "time": "2025-11-12T10:30:00.000Z" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,

    /// Service name
    pub service: String,

    /// Current time, ISO 8601 UTC with milliseconds
    pub time: String,
}

/// Acknowledgement of an accepted alert: `{"ok":true}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
}

impl AckResponse {
    pub fn accepted() -> Self {
        Self { ok: true }
    }
}

/// Error response: `{"ok":false,"error":"..."}`.
///
/// The message never contains internal details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: message.into(),
        }
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
