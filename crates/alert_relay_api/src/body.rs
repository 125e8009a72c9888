//! Bounded request body reader
//!
//! Reads a request body frame by frame into memory, up to a hard limit. Once the
//! limit is exceeded the buffer is released and the remaining frames are read
//! and discarded, so the client has finished sending before the 413 response
//! is written.

use axum::body::Body;
use http_body_util::BodyExt;

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;

/// Result of reading a body against a size limit.
#[derive(Debug, PartialEq, Eq)]
pub enum BoundedBody {
    /// The whole body, no larger than the limit.
    Complete(Vec<u8>),

    /// The body exceeded the limit. Nothing was kept.
    TooLarge { received: usize },
}

/// The body stream failed before it was complete, usually because the client
/// disconnected.
#[derive(Debug, thiserror::Error)]
#[error("Request body stream failed: {0}")]
pub struct BodyReadError(#[from] axum::Error);

/// Read `body` to the end, keeping at most `limit` bytes.
///
/// # Errors
///
/// Returns `BodyReadError` if the underlying stream fails. Anything read so far
/// is dropped.
pub async fn read_bounded(mut body: Body, limit: usize) -> Result<BoundedBody, BodyReadError> {
    let mut buffer = Vec::new();
    let mut received: usize = 0;
    let mut too_large = false;

    while let Some(frame) = body.frame().await {
        let frame = frame?;
        let Ok(data) = frame.into_data() else {
            // Trailers carry no payload.
            continue;
        };

        received = received.saturating_add(data.len());
        if too_large {
            continue;
        }

        if received > limit {
            too_large = true;
            buffer = Vec::new();
            continue;
        }

        buffer.extend_from_slice(&data);
    }

    if too_large {
        tracing::warn!(received, limit, "Request body exceeded limit");
        Ok(BoundedBody::TooLarge { received })
    } else {
        Ok(BoundedBody::Complete(buffer))
    }
}
