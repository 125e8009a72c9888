//! tv-webhook HTTP API
//!
//! This crate provides the HTTP surface of the alert relay. It exposes a health
//! endpoint and the alert intake endpoint that alert producers post to.
//!
//! # Architecture
//!
//! This crate exists in the HTTP layer and handles:
//! - Routing and server configuration
//! - Path secret verification and bounded body reading
//! - Error mapping to `{ok:false, error}` JSON responses
//! - Request tracing and panic containment
//!
//! Payload normalization and sink delivery live in `alert_relay_core`.
//! The dependency flows: HTTP API → Business Logic, never the reverse.
//!
//! # Endpoints
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/`, `/health` | 200 `{ok:true, service, time}` |
//! | POST | `/tv/{secret}` | 200 `{ok:true}`, 403, 413, 500 |
//! | * | anything else | 404 `{ok:false, error:"Not found"}` |

use std::sync::Arc;

use alert_relay_core::{RelayConfig, SinkSet};

pub mod body;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod responder;
pub mod routes;
pub mod server;

// Re-export key types for convenience
pub use errors::ApiError;
pub use responder::JsonReply;
pub use server::ApiServer;

/// Application state shared across handlers
///
/// Both members are immutable after startup, so cloning the state per request
/// only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    /// Relay configuration loaded at boot
    pub config: Arc<RelayConfig>,

    /// Sinks enabled by the configuration
    pub sinks: Arc<SinkSet>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: RelayConfig, sinks: SinkSet) -> Self {
        Self {
            config: Arc::new(config),
            sinks: Arc::new(sinks),
        }
    }
}
