//! Error types for the alert relay.
//!
//! Only configuration errors can stop the process. Sink errors are captured into
//! [`crate::DeliveryResult`] values and logged; they never reach the alert producer.

use std::time::Duration;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while building a [`crate::RelayConfig`] from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable was present but its value could not be used.
    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors raised by a single delivery attempt to a downstream sink.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The request could not be sent or the response could not be read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The destination answered with a non-success status.
    #[error("Destination returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The attempt did not finish within the per-sink timeout.
    #[error("Delivery timed out after {0:?}")]
    Timeout(Duration),

    /// The outbound body could not be serialized.
    #[error("Failed to serialize outbound body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The delivery task panicked or was cancelled before producing a result.
    #[error("Delivery task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SinkError {
    /// HTTP status code reported by the destination, if it answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SinkError::Status { status, .. } => Some(*status),
            SinkError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
