//! Request tracing middleware
//!
//! Assigns every request an id, logs its start and completion, and returns the
//! id in the `x-request-id` response header. Paths are logged with the intake
//! secret redacted.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;

/// Response header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Path prefix of the intake endpoint; everything after it is secret.
const INTAKE_PREFIX: &str = "/tv/";

/// Replace the secret segment of an intake path.
pub fn redact_path(path: &str) -> String {
    match path.strip_prefix(INTAKE_PREFIX) {
        Some(_) => format!("{}***", INTAKE_PREFIX),
        None => path.to_string(),
    }
}

/// Request tracing middleware.
///
/// Adds request ID and logging context for observability.
pub async fn tracing_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();

    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        path = %redact_path(request.uri().path()),
        "Request started"
    );

    let mut response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}
