//! HTTP request handlers
//!
//! The intake handler runs the steps below strictly in order:
//! 1. Verify the path secret. The body is not read on failure.
//! 2. Read the body up to [`MAX_BODY_BYTES`].
//! 3. Normalize the body into an [`AlertPayload`].
//! 4. Log the payload.
//! 5. Deliver to every active sink and wait for all attempts.
//! 6. Acknowledge with `{ok:true}`.
//!
//! Sink outcomes never change the response.

use std::any::Any;

use alert_relay_core::{AlertPayload, MAX_BODY_BYTES, SERVICE_NAME};
use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};

use crate::{
    body::{read_bounded, BoundedBody},
    errors::ApiError,
    models::{AckResponse, HealthResponse},
    responder::JsonReply,
    AppState,
};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// GET / and GET /health
///
/// Liveness check. Reads no state.
pub async fn health_check() -> JsonReply<HealthResponse> {
    JsonReply::ok(HealthResponse {
        ok: true,
        service: SERVICE_NAME.to_string(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// POST /tv/{secret}
///
/// The secret is the percent-decoded remainder of the path after `/tv/`.
/// A path with a malformed escape such as `%ZZ` is never decoded and is
/// rejected like a wrong secret.
pub async fn receive_alert(
    State(state): State<AppState>,
    uri: Uri,
    secret: Result<Path<String>, PathRejection>,
    body: Body,
) -> Result<JsonReply<AckResponse>, ApiError> {
    if has_malformed_escape(uri.path()) {
        tracing::warn!("Malformed percent-escape in intake path");
        return Err(ApiError::Forbidden);
    }

    let candidate = match secret {
        Ok(Path(candidate)) => candidate,
        Err(rejection) => {
            // A path that cannot be decoded cannot match any configured secret.
            tracing::warn!(error = %rejection, "Undecodable intake path");
            return Err(ApiError::Forbidden);
        }
    };

    intake(state, &candidate, body).await
}

/// POST /tv/
///
/// Same as [`receive_alert`] with an empty secret candidate.
pub async fn receive_alert_without_secret(
    State(state): State<AppState>,
    body: Body,
) -> Result<JsonReply<AckResponse>, ApiError> {
    intake(state, "", body).await
}

async fn intake(
    state: AppState,
    candidate: &str,
    body: Body,
) -> Result<JsonReply<AckResponse>, ApiError> {
    if !state.config.accepts_secret(candidate) {
        return Err(ApiError::Forbidden);
    }

    let bytes = match read_bounded(body, MAX_BODY_BYTES).await? {
        BoundedBody::Complete(bytes) => bytes,
        BoundedBody::TooLarge { .. } => return Err(ApiError::PayloadTooLarge),
    };

    let payload = AlertPayload::from_body(&bytes);
    drop(bytes);

    tracing::info!(
        time = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        raw = payload.is_raw(),
        payload = %payload.to_compact_json(),
        "Alert received"
    );

    let results = state.sinks.dispatch(&payload).await;
    let failed = results.iter().filter(|r| !r.success).count();
    tracing::debug!(sinks = results.len(), failed, "Fan-out finished");

    Ok(JsonReply::ok(AckResponse::accepted()))
}

/// Whether `path` has a `%` not followed by two hex digits.
fn has_malformed_escape(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

/// Fallback for every unmatched method and path.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Convert a panic caught at the outermost layer into a 500 response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::internal(format!("handler panicked: {}", detail)).into_response()
}
