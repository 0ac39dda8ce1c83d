//! Wire-level HTTP request/response types and client trait.

use std::time::Duration;

use super::{Attachment, TransportError};

/// Per-request connection settings.
///
/// These are applied when the connection for a request is built, so two
/// requests through the same client may use different proxies or timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Upper bound for the whole exchange; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Proxy used for every scheme
    pub proxy: Option<url::Url>,
    /// Whether server certificates are verified
    pub tls_verify: bool,
}

impl ConnectionSettings {
    /// Returns true if the request can share the client's default connection pool.
    #[must_use]
    pub const fn uses_default_connection(&self) -> bool {
        self.proxy.is_none() && self.tls_verify
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            timeout: None,
            proxy: None,
            tls_verify: true,
        }
    }
}

/// One field of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// Plain text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// File field
    File {
        /// Field name
        name: String,
        /// File contents and metadata
        attachment: Attachment,
    },
}

/// An HTTP request to be sent.
///
/// This is a value type that can be constructed and passed to any
/// [`HttpClient`] implementation. It uses standard `http` crate types
/// for method and headers.
///
/// When `parts` is non-empty the request is sent as `multipart/form-data`
/// and `body` is ignored.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
    /// Multipart fields
    pub parts: Vec<FormPart>,
    /// Connection settings for this request
    pub settings: ConnectionSettings,
}

impl HttpRequest {
    /// Creates a new HTTP request with the given method and URL.
    ///
    /// Headers are initialized to an empty map, body is `None` and
    /// connection settings are the defaults.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
            parts: Vec::new(),
            settings: ConnectionSettings::default(),
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header to the request.
    ///
    /// If the header name already exists, the value is appended.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Adds a multipart field.
    #[must_use]
    pub fn with_part(mut self, part: FormPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Replaces the connection settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ConnectionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns true if the request carries a multipart body.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        !self.parts.is_empty()
    }
}

/// An HTTP response received from a server.
///
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for making HTTP requests.
///
/// Abstracts the HTTP library so the requester and gateway can be
/// exercised with in-memory clients.
///
/// # Example
///
/// ```ignore
/// use phone_relay::transport::{HttpClient, HttpRequest, HttpResponse, TransportError};
///
/// struct CannedClient {
///     response: HttpResponse,
/// }
///
/// impl HttpClient for CannedClient {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, TransportError> {
///         Ok(self.response.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// Any status code, including 4xx and 5xx, is a successful exchange at
    /// this level; classification happens in the requester.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when:
    /// - Network connection fails ([`TransportError::Connection`])
    /// - The request times out ([`TransportError::Timeout`])
    /// - The request cannot be built ([`TransportError::InvalidRequest`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send;
}
