//! Error handling and HTTP error conversion
//!
//! Errors visible to callers are limited to the taxonomy below. Each converts to
//! a `{ok:false, error}` JSON response through the shared responder, and is
//! logged server-side at a level chosen by its status. Internal details are
//! logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{body::BodyReadError, models::ErrorResponse, responder::JsonReply};

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors returned by request handlers.
///
/// The `Display` text is the exact message sent to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Secret missing, not configured, or wrong
    #[error("Forbidden")]
    Forbidden,

    /// Body exceeded the size limit
    #[error("Payload too large")]
    PayloadTooLarge,

    /// No route matched
    #[error("Not found")]
    NotFound,

    /// The client went away before the body was complete
    #[error("Request aborted")]
    ClientAborted(#[source] BodyReadError),

    /// Any other fault. The detail is logged, not returned.
    #[error("Server error")]
    Internal(String),
}

impl ApiError {
    /// Create an internal server error
    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::Internal(detail.into())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ClientAborted(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BodyReadError> for ApiError {
    fn from(err: BodyReadError) -> Self {
        ApiError::ClientAborted(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        log_error(&self, status);

        JsonReply::new(status, ErrorResponse::new(self.to_string())).into_response()
    }
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError, status: StatusCode) {
    match error {
        ApiError::Internal(detail) => {
            tracing::error!(status = %status, detail = %detail, "Request failed");
        }
        ApiError::ClientAborted(source) => {
            tracing::info!(error = %source, "Client aborted request");
        }
        ApiError::NotFound => {
            tracing::debug!(status = %status, "No route matched");
        }
        _ => {
            tracing::warn!(status = %status, "Request rejected: {}", error);
        }
    }
}
