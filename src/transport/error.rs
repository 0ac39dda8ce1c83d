//! Error types for outbound HTTP operations.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while dispatching a request, before any HTTP status exists.
///
/// Describes what went wrong on the wire without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS handshake errors, and failures while reading the body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The configured timeout elapsed before the exchange completed.
    #[error("Request timed out: {0}")]
    Timeout(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request could not be built (bad URL, proxy, header or form body).
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// A completed exchange whose status was outside `200..=299`.
///
/// The message is `"<status>:<body>"`.
#[derive(Debug, Clone, Error)]
#[error("{}:{body}", status.as_u16())]
pub struct ResponseFailure {
    /// HTTP status returned by the server
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Raw response body
    pub body: String,
}

impl ResponseFailure {
    /// Attempts to decode the body as JSON.
    ///
    /// Returns `None` for an empty or malformed body instead of failing, so
    /// callers can probe for provider error details unconditionally.
    #[must_use]
    pub fn json(&self) -> Option<serde_json::Value> {
        decode_json(&self.body)
    }
}

/// Error returned by [`Requester::execute`](super::Requester::execute).
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never produced an HTTP response.
    #[error("{method} {url} failed: {source}")]
    Transport {
        /// Method of the failed request
        method: http::Method,
        /// URL as it appears in the logs (see `RequestOptions::log_url`)
        url: String,
        /// Underlying failure
        #[source]
        source: TransportError,
    },

    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Response(#[from] ResponseFailure),
}

impl RequestError {
    /// Returns the HTTP status when the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Transport { .. } => None,
            Self::Response(failure) => Some(failure.status),
        }
    }

    /// Returns true if the request failed because of its timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                source: TransportError::Timeout(_),
                ..
            }
        )
    }
}

/// Error building a file attachment.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// The file named by the attachment source could not be read.
    #[error("Failed to read attachment '{}': {source}", path.display())]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The content type is not a valid MIME type.
    #[error("Invalid attachment content type '{0}'")]
    InvalidContentType(String),
}

/// Lenient JSON decoding shared by error bodies and envelopes.
pub(crate) fn decode_json(body: &str) -> Option<serde_json::Value> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str(body).ok()
}
