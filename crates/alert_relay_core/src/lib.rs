//! # Alert Relay Core
//!
//! This crate provides the business logic for the tv-webhook alert relay, a small
//! service that receives alert callbacks from a single producer and relays them to
//! any number of downstream consumers.
//!
//! ## Overview
//!
//! The relay handles one workflow:
//! 1. Normalizing a raw request body into an [`AlertPayload`]
//! 2. Fanning the payload out to the configured [`AlertSink`]s
//! 3. Recording a [`DeliveryResult`] per sink, which is logged and never surfaced
//!
//! Configuration is loaded once at process start into an immutable [`RelayConfig`]
//! and shared by reference with everything that needs it.
//!
//! ## Examples
//!
//! ```no_run
//! use alert_relay_core::{AlertPayload, RelayConfig, SinkSet};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RelayConfig::from_env()?;
//! let sinks = SinkSet::from_config(&config, reqwest::Client::new());
//!
//! let payload = AlertPayload::from_body(br#"{"ticker":"BTC"}"#);
//! for result in sinks.dispatch(&payload).await {
//!     println!("{}: success={}", result.sink, result.success);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod payload;
pub mod sinks;

pub use config::{NotifyCredentials, RelayConfig};
pub use errors::{ConfigError, SinkError};
pub use payload::AlertPayload;
pub use sinks::{AlertSink, DeliveryResult, ForwardSink, NotifySink, SinkSet};

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "tv-webhook";

/// Maximum accepted request body size in bytes.
pub const MAX_BODY_BYTES: usize = 1_000_000;
