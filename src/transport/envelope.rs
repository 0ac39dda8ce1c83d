//! Normalized result of an outbound request.

use std::time::{Duration, SystemTime};

use super::error::decode_json;

/// Wall-clock bracket around the network exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Taken immediately before dispatch
    pub start: SystemTime,
    /// Taken immediately after completion or failure
    pub end: SystemTime,
    /// `end - start`, clamped at zero if the clock stepped backwards
    pub duration: Duration,
}

impl Timing {
    /// Builds the bracket from two clock readings.
    #[must_use]
    pub fn between(start: SystemTime, end: SystemTime) -> Self {
        Self {
            start,
            end,
            duration: end.duration_since(start).unwrap_or(Duration::ZERO),
        }
    }

    /// Duration rounded to whole milliseconds, as printed in logs.
    #[must_use]
    pub fn duration_ms(&self) -> u128 {
        (self.duration + Duration::from_micros(500)).as_millis()
    }
}

/// Result of a completed exchange, successful or not.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    /// True iff `status` is 2xx
    pub success: bool,
    /// HTTP status
    pub status: http::StatusCode,
    /// Raw body text
    pub body: String,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Timing of the exchange
    pub timing: Timing,
}

impl ResponseEnvelope {
    /// Creates an envelope; `success` is derived from the status.
    #[must_use]
    pub fn new(
        status: http::StatusCode,
        body: String,
        headers: http::HeaderMap,
        timing: Timing,
    ) -> Self {
        Self {
            success: status.is_success(),
            status,
            body,
            headers,
            timing,
        }
    }

    /// Attempts to decode the body as JSON; `None` when empty or malformed.
    #[must_use]
    pub fn json(&self) -> Option<serde_json::Value> {
        decode_json(&self.body)
    }
}
