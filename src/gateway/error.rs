//! Error types for provider operations.

use thiserror::Error;

use crate::transport::{RequestError, ResponseFailure};

/// Error returned by gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request failed in transport or got a non-4xx error status.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The provider refused the request with a 4xx status.
    #[error("Provider rejected request with {}: {detail}", status.as_u16())]
    Rejected {
        /// HTTP status returned
        status: http::StatusCode,
        /// Provider error detail extracted from the body
        detail: String,
        /// The full failed response
        #[source]
        source: ResponseFailure,
    },

    /// A 2xx response body was not valid JSON.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    /// A provider or callback URL could not be built from the configured base.
    #[error("Cannot build URL from base '{0}'")]
    InvalidUrl(String),
}

impl GatewayError {
    /// Returns true if no HTTP response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Request(RequestError::Transport { .. }))
    }

    /// Returns true if the provider refused the request (4xx).
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Returns the HTTP status when the provider answered.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Request(err) => err.status(),
            Self::Rejected { status, .. } => Some(*status),
            Self::InvalidResponse(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// Classifies a failed request.
    ///
    /// 4xx responses become [`GatewayError::Rejected`] with the provider's
    /// detail; everything else is passed through.
    #[must_use]
    pub fn from_request(err: RequestError) -> Self {
        match err {
            RequestError::Response(failure) if failure.status.is_client_error() => {
                let detail = provider_detail(&failure);
                Self::Rejected {
                    status: failure.status,
                    detail,
                    source: failure,
                }
            }
            other => Self::Request(other),
        }
    }
}

/// Extracts the provider's explanation from an error body.
///
/// A body carrying an `errors` member is returned whole. Otherwise the
/// `detail` or `message` string is used, falling back to the raw body.
#[must_use]
pub fn provider_detail(failure: &ResponseFailure) -> String {
    let Some(json) = failure.json() else {
        return failure.body.clone();
    };

    if json.get("errors").is_some() {
        return failure.body.clone();
    }

    ["detail", "message"]
        .iter()
        .find_map(|key| json.get(key).and_then(serde_json::Value::as_str))
        .map_or_else(|| failure.body.clone(), str::to_string)
}
