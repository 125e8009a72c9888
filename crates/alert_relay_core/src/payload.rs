//! Alert payload normalization.
//!
//! Alert producers are not required to send JSON. A body that parses as JSON is
//! relayed as-is; anything else is wrapped as `{"raw": "<text>"}` so downstream
//! consumers always receive a JSON document.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;

/// A normalized alert body.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertPayload {
    /// The body was empty or valid JSON. Any JSON value is accepted.
    Structured(Value),

    /// The body could not be parsed as JSON.
    Raw(String),
}

impl AlertPayload {
    /// Normalize a complete request body.
    ///
    /// An empty body becomes `{}`. This never fails.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return AlertPayload::Structured(Value::Object(Map::new()));
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => AlertPayload::Structured(value),
            Err(err) => {
                tracing::debug!(error = %err, "Body is not JSON, relaying as raw text");
                AlertPayload::Raw(String::from_utf8_lossy(body).into_owned())
            }
        }
    }

    /// Compact JSON rendering, as logged and sent in notifications.
    pub fn to_compact_json(&self) -> String {
        // Serializing a `Value` cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Whether the body had to be wrapped as raw text.
    pub fn is_raw(&self) -> bool {
        matches!(self, AlertPayload::Raw(_))
    }
}

impl Serialize for AlertPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AlertPayload::Structured(value) => value.serialize(serializer),
            AlertPayload::Raw(text) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("raw", text)?;
                map.end()
            }
        }
    }
}
