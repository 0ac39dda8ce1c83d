//! Caller-facing description of a single outbound request.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::Url;

use super::{Attachment, ConnectionSettings, FormPart, HttpRequest, TransportError};

/// Content type of URL-encoded form bodies.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// User name
    pub username: String,
    /// Password
    pub password: String,
}

impl BasicAuth {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Renders the `Authorization` header value.
    ///
    /// The value is marked sensitive so it is never printed by `Debug`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] if the value is not a
    /// valid header value.
    pub fn header_value(&self) -> Result<HeaderValue, TransportError> {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to execute one request.
///
/// Built fully before it reaches [`Requester::execute`](super::Requester::execute),
/// which only borrows it.
///
/// # Example
///
/// ```
/// use phone_relay::transport::RequestOptions;
/// use std::time::Duration;
///
/// let url = url::Url::parse("https://api.example.com/Messages.json").unwrap();
/// let options = RequestOptions::post(url)
///     .with_form_field("To", "+15550001111")
///     .with_basic_auth("user", "secret")
///     .with_timeout(Duration::from_secs(10));
/// assert!(options.tls_verify);
/// ```
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// Target URL
    pub url: Url,
    /// Form fields; sorted, so encoding does not depend on insertion order
    pub body: Option<BTreeMap<String, String>>,
    /// Extra headers
    pub headers: HeaderMap,
    /// Basic credentials
    pub basic_auth: Option<BasicAuth>,
    /// Proxy for this request
    pub proxy: Option<Url>,
    /// Timeout for this request
    pub timeout: Option<Duration>,
    /// Verify server certificates (default true)
    pub tls_verify: bool,
    /// Return non-2xx envelopes instead of failing (default false)
    pub return_failed_response: bool,
    /// URL written to logs in place of `url`
    pub log_url: Option<String>,
    /// Files sent as multipart fields, keyed by field name
    pub attachments: Vec<(String, Attachment)>,
}

impl RequestOptions {
    /// Creates options for the given method and URL with all defaults.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            headers: HeaderMap::new(),
            basic_auth: None,
            proxy: None,
            timeout: None,
            tls_verify: true,
            return_failed_response: false,
            log_url: None,
            attachments: Vec::new(),
        }
    }

    /// Creates GET options.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates POST options.
    #[must_use]
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// Replaces the form body.
    #[must_use]
    pub fn with_form(mut self, body: BTreeMap<String, String>) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds one form field, creating the body if needed.
    #[must_use]
    pub fn with_form_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.body
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets Basic credentials.
    #[must_use]
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some(BasicAuth::new(username, password));
        self
    }

    /// Sets the proxy.
    #[must_use]
    pub fn with_proxy(mut self, proxy: Url) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables or disables certificate verification.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Returns non-2xx envelopes instead of failing.
    #[must_use]
    pub const fn returning_failed_response(mut self) -> Self {
        self.return_failed_response = true;
        self
    }

    /// Sets the URL written to logs, for URLs that embed secrets.
    #[must_use]
    pub fn with_log_url(mut self, log_url: impl Into<String>) -> Self {
        self.log_url = Some(log_url.into());
        self
    }

    /// Adds a file field; the request becomes multipart.
    #[must_use]
    pub fn with_attachment(mut self, name: impl Into<String>, attachment: Attachment) -> Self {
        self.attachments.push((name.into(), attachment));
        self
    }

    /// Applies timeout, proxy and TLS settings in one step.
    #[must_use]
    pub fn with_settings(mut self, settings: &ConnectionSettings) -> Self {
        self.timeout = settings.timeout;
        self.proxy.clone_from(&settings.proxy);
        self.tls_verify = settings.tls_verify;
        self
    }

    /// Returns the URL to print in logs.
    #[must_use]
    pub fn log_url(&self) -> &str {
        self.log_url.as_deref().unwrap_or_else(|| self.url.as_str())
    }

    /// Returns the connection settings carried by these options.
    #[must_use]
    pub fn settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            timeout: self.timeout,
            proxy: self.proxy.clone(),
            tls_verify: self.tls_verify,
        }
    }

    /// Lowers the options into a wire-level [`HttpRequest`].
    ///
    /// The form body is URL-encoded with a matching `Content-Type` unless the
    /// caller already set one; with attachments, form fields and files become
    /// multipart parts instead.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] if the body cannot be
    /// encoded or the credentials do not form a valid header.
    pub fn to_http_request(&self) -> Result<HttpRequest, TransportError> {
        let mut request =
            HttpRequest::new(self.method.clone(), self.url.clone()).with_settings(self.settings());

        for (name, value) in &self.headers {
            request.headers.append(name, value.clone());
        }

        if let Some(auth) = &self.basic_auth {
            request.headers.insert(AUTHORIZATION, auth.header_value()?);
        }

        if self.attachments.is_empty() {
            if let Some(body) = &self.body {
                let encoded = serde_urlencoded::to_string(body)
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                if !request.headers.contains_key(CONTENT_TYPE) {
                    request
                        .headers
                        .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
                }
                request.body = Some(encoded.into_bytes());
            }
            return Ok(request);
        }

        // reqwest sets the multipart boundary header itself.
        request.headers.remove(CONTENT_TYPE);
        for (name, value) in self.body.iter().flatten() {
            request.parts.push(FormPart::Text {
                name: name.clone(),
                value: value.clone(),
            });
        }
        for (name, attachment) in &self.attachments {
            request.parts.push(FormPart::File {
                name: name.clone(),
                attachment: attachment.clone(),
            });
        }

        Ok(request)
    }
}
