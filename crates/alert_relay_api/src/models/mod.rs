//! HTTP response models
//!
//! These types exist only in the HTTP layer.

pub mod response;

// Re-export commonly used types
pub use response::{AckResponse, ErrorResponse, HealthResponse};
