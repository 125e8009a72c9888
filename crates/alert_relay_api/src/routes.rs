//! HTTP routing configuration
//!
//! # Route Structure
//!
//! - GET    / - Health check
//! - GET    /health - Health check
//! - POST   /tv/{secret} - Alert intake
//!
//! Any other method or path, including a wrong method on a known path, is
//! answered with 404 rather than 405.

use axum::{
    extract::Request,
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultOnResponse, TraceLayer},
};

use crate::{
    handlers,
    middleware::{redact_path, tracing_middleware},
    AppState,
};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Create the complete router with all routes configured.
///
/// This function sets up:
/// - All endpoint routes with a JSON 404 fallback
/// - Request tracing with the intake secret redacted
/// - Panic containment, converting panics into 500 responses
pub fn create_router(state: AppState) -> Router {
    // Configure request tracing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %redact_path(request.uri().path()),
            )
        })
        .on_response(DefaultOnResponse::new());

    Router::new()
        .route("/", health_route())
        .route("/health", health_route())
        // `/tv/*secret` does not match an empty remainder
        .route(
            "/tv/",
            post(handlers::receive_alert_without_secret).fallback(handlers::not_found),
        )
        .route(
            "/tv/*secret",
            post(handlers::receive_alert).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(tracing_middleware))
        .layer(trace_layer)
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .with_state(state)
}

/// GET only. axum answers HEAD with the GET handler unless HEAD has its own.
fn health_route() -> MethodRouter<AppState> {
    get(handlers::health_check)
        .head(handlers::not_found)
        .fallback(handlers::not_found)
}
