//! Production HTTP client implementation using reqwest.

use super::{ConnectionSettings, FormPart, HttpClient, HttpRequest, HttpResponse, TransportError};

/// Production HTTP client using reqwest.
///
/// Requests with default connection settings share one pooled
/// `reqwest::Client`. A request that names a proxy or disables certificate
/// verification gets a dedicated client built for that call.
///
/// # Example
///
/// ```no_run
/// use phone_relay::transport::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://api.example.com/webhook")?;
/// let request = HttpRequest::new(http::Method::POST, url).with_body(b"hello".to_vec());
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new HTTP client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Creates an HTTP client from an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    fn client_for(&self, settings: &ConnectionSettings) -> Result<reqwest::Client, TransportError> {
        if settings.uses_default_connection() {
            return Ok(self.inner.clone());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(proxy) = &settings.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| TransportError::InvalidRequest(format!("proxy: {e}")))?;
            builder = builder.proxy(proxy);
        }
        if !settings.tls_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

fn multipart_form(parts: Vec<FormPart>) -> Result<reqwest::multipart::Form, TransportError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, attachment } => {
                let mut file = reqwest::multipart::Part::bytes(attachment.bytes)
                    .mime_str(&attachment.content_type)
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                if let Some(filename) = attachment.filename {
                    file = file.file_name(filename);
                }
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(Box::new(error))
    } else if error.is_builder() {
        TransportError::InvalidRequest(error.to_string())
    } else {
        TransportError::Connection(Box::new(error))
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = self.client_for(&req.settings)?;
        let mut builder = client.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(timeout) = req.settings.timeout {
            builder = builder.timeout(timeout);
        }

        if !req.parts.is_empty() {
            builder = builder.multipart(multipart_form(req.parts)?);
        } else if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}
