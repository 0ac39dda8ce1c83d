//! Request execution with timing, logging and outcome classification.

use url::Url;

use crate::time::{Clock, SystemClock};

use super::{
    HttpClient, RequestError, RequestOptions, ResponseEnvelope, ResponseFailure, Timing,
};

/// Maximum length of the body preview written to the INFO log line.
pub const PREVIEW_LIMIT: usize = 350;

/// Executes [`RequestOptions`] through an [`HttpClient`].
///
/// Each call is one network round-trip. Nothing is retried; retry policy
/// belongs to the caller.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `C`: The clock used for timing (defaults to [`SystemClock`])
///
/// # Example
///
/// ```no_run
/// use phone_relay::transport::{Requester, ReqwestClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let requester = Requester::new(ReqwestClient::new());
/// let url = url::Url::parse("https://api.example.com/status")?;
/// let envelope = requester.get(url).await?;
/// println!("{} in {}ms", envelope.status, envelope.timing.duration_ms());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Requester<H, C = SystemClock> {
    client: H,
    clock: C,
}

impl<H> Requester<H, SystemClock> {
    /// Creates a requester that times requests with the system clock.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self {
            client,
            clock: SystemClock,
        }
    }
}

impl<H, C> Requester<H, C> {
    /// Sets a custom clock.
    ///
    /// This is primarily useful for testing timing without real delays.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> Requester<H, C2> {
        Requester {
            client: self.client,
            clock,
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }
}

impl<H: HttpClient, C: Clock> Requester<H, C> {
    /// Executes one request.
    ///
    /// The timing bracket covers only the network exchange, not building
    /// the request. One log line is written per call: ERROR for transport
    /// failures, INFO for any HTTP response.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Transport`] if no response was received
    /// - [`RequestError::Response`] for a non-2xx status, unless
    ///   `options.return_failed_response` is set
    pub async fn execute(&self, options: &RequestOptions) -> Result<ResponseEnvelope, RequestError> {
        let method = options.method.clone();
        let log_url = options.log_url();

        let request = options
            .to_http_request()
            .map_err(|source| RequestError::Transport {
                method: method.clone(),
                url: log_url.to_string(),
                source,
            })?;

        let start = self.clock.now();
        let result = self.client.request(request).await;
        let timing = Timing::between(start, self.clock.now());

        let response = match result {
            Ok(response) => response,
            Err(source) => {
                tracing::error!(
                    "{method} {log_url} ERROR ({}ms): {source}",
                    timing.duration_ms()
                );
                return Err(RequestError::Transport {
                    method,
                    url: log_url.to_string(),
                    source,
                });
            }
        };

        let body = response.body_text();
        tracing::info!(
            "{method} {log_url} response ({}ms): {} {}",
            timing.duration_ms(),
            response.status.as_u16(),
            preview_body(&body)
        );

        if !response.is_success() && !options.return_failed_response {
            return Err(ResponseFailure {
                status: response.status,
                headers: response.headers,
                body,
            }
            .into());
        }

        Ok(ResponseEnvelope::new(
            response.status,
            body,
            response.headers,
            timing,
        ))
    }

    /// Executes a GET request with default options.
    ///
    /// # Errors
    ///
    /// See [`Requester::execute`].
    pub async fn get(&self, url: Url) -> Result<ResponseEnvelope, RequestError> {
        self.execute(&RequestOptions::get(url)).await
    }

    /// Executes a DELETE request with default options.
    ///
    /// # Errors
    ///
    /// See [`Requester::execute`].
    pub async fn delete(&self, url: Url) -> Result<ResponseEnvelope, RequestError> {
        self.execute(&RequestOptions::new(http::Method::DELETE, url))
            .await
    }

    /// Executes a POST request with a form body.
    ///
    /// # Errors
    ///
    /// See [`Requester::execute`].
    pub async fn post<K, V>(
        &self,
        url: Url,
        body: impl IntoIterator<Item = (K, V)>,
    ) -> Result<ResponseEnvelope, RequestError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.execute(&with_body(RequestOptions::post(url), body))
            .await
    }

    /// Executes a PUT request with a form body.
    ///
    /// # Errors
    ///
    /// See [`Requester::execute`].
    pub async fn put<K, V>(
        &self,
        url: Url,
        body: impl IntoIterator<Item = (K, V)>,
    ) -> Result<ResponseEnvelope, RequestError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.execute(&with_body(RequestOptions::new(http::Method::PUT, url), body))
            .await
    }

    /// Executes a PATCH request with a form body.
    ///
    /// # Errors
    ///
    /// See [`Requester::execute`].
    pub async fn patch<K, V>(
        &self,
        url: Url,
        body: impl IntoIterator<Item = (K, V)>,
    ) -> Result<ResponseEnvelope, RequestError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.execute(&with_body(RequestOptions::new(http::Method::PATCH, url), body))
            .await
    }
}

fn with_body<K, V>(options: RequestOptions, body: impl IntoIterator<Item = (K, V)>) -> RequestOptions
where
    K: Into<String>,
    V: Into<String>,
{
    let form = body
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    options.with_form(form)
}

/// Debug-quotes `body` and truncates it to [`PREVIEW_LIMIT`] characters.
///
/// A truncated preview ends with `... (N total)"` where `N` is the
/// character count of the raw body; the marker counts toward the limit.
#[must_use]
pub fn preview_body(body: &str) -> String {
    let quoted = format!("{body:?}");
    if quoted.chars().count() <= PREVIEW_LIMIT {
        return quoted;
    }

    let omission = format!("... ({} total)\"", body.chars().count());
    let keep = PREVIEW_LIMIT.saturating_sub(omission.chars().count());
    let mut preview: String = quoted.chars().take(keep).collect();
    preview.push_str(&omission);
    preview
}
