//! Provider REST operations and webhook handling.

use http::StatusCode;
use serde_json::Value;
use url::Url;

use crate::signature::{MISSING_SIGNATURE, RequestValidator, WebhookPayload};
use crate::time::{Clock, SystemClock};
use crate::transport::{ConnectionSettings, HttpClient, RequestOptions, Requester};
use crate::verification::verification_message;

use super::{
    API_VERSION, GatewayConfig, GatewayError, TWIML_CONTENT_TYPE, dial_forward_document,
    hangup_document,
};

/// Path of the callback the provider requests once a placed call is answered.
pub const CONNECT_PATH: [&str; 2] = ["twilio", "connect"];

/// Query parameter of the connect callback naming the forwarding target.
pub const NUMBER_TO_PARAM: &str = "number_to";

/// A resource created by the provider (a call or a message).
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResource {
    /// HTTP status of the creating request
    pub status_code: StatusCode,
    /// Decoded response body
    pub body: Value,
}

impl ProviderResource {
    /// Resource identifier (`CA...` for calls, `SM...` for messages).
    #[must_use]
    pub fn sid(&self) -> Option<&str> {
        self.body.get("sid").and_then(Value::as_str)
    }

    /// Provider-side state, e.g. `queued`.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.body.get("status").and_then(Value::as_str)
    }

    /// Looks up any top-level field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }
}

/// Reply to an inbound callback: status plus call-control document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookReply {
    /// HTTP status to answer with
    pub status: StatusCode,
    /// Call-control document
    pub body: String,
}

impl WebhookReply {
    /// Content type of [`WebhookReply::body`].
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        TWIML_CONTENT_TYPE
    }

    /// Returns true if the reply forwards the call.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    fn hangup(status: StatusCode) -> Self {
        Self {
            status,
            body: hangup_document().to_string(),
        }
    }
}

/// Client for one provider account.
///
/// Outbound operations are single awaited round-trips through the
/// [`Requester`]; nothing is retried. Failures are logged at WARN and
/// returned.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `C`: The clock used for request timing (defaults to [`SystemClock`])
///
/// # Example
///
/// ```no_run
/// use phone_relay::gateway::{GatewayConfig, TelephonyGateway};
/// use phone_relay::transport::ReqwestClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GatewayConfig::new(
///     "AC123",
///     "auth-token",
///     "+15559990000",
///     url::Url::parse("https://relay.example.com")?,
/// );
/// let gateway = TelephonyGateway::new(ReqwestClient::new(), config);
/// let call = gateway.place_call("+15550001111", "+15550002222").await?;
/// println!("placed {:?}", call.sid());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TelephonyGateway<H, C = SystemClock> {
    requester: Requester<H, C>,
    config: GatewayConfig,
    validator: RequestValidator,
    settings: ConnectionSettings,
}

impl<H> TelephonyGateway<H, SystemClock> {
    /// Creates a gateway with default connection settings.
    #[must_use]
    pub fn new(client: H, config: GatewayConfig) -> Self {
        let validator = RequestValidator::new(config.auth_token.clone());
        Self {
            requester: Requester::new(client),
            config,
            validator,
            settings: ConnectionSettings::default(),
        }
    }
}

impl<H, C> TelephonyGateway<H, C> {
    /// Sets a custom clock for request timing.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> TelephonyGateway<H, C2> {
        TelephonyGateway {
            requester: self.requester.with_clock(clock),
            config: self.config,
            validator: self.validator,
            settings: self.settings,
        }
    }

    /// Sets timeout, proxy and TLS settings for every outbound request.
    #[must_use]
    pub fn with_settings(mut self, settings: ConnectionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the account configuration.
    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Returns the underlying requester.
    #[must_use]
    pub const fn requester(&self) -> &Requester<H, C> {
        &self.requester
    }

    /// URL of a REST collection, e.g. `.../Accounts/AC123/Calls.json`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidUrl`] if the API base cannot carry a path.
    pub fn resource_url(&self, resource: &str) -> Result<Url, GatewayError> {
        let collection = format!("{resource}.json");
        let mut url = self.config.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::InvalidUrl(self.config.api_base.to_string()))?
            .pop_if_empty()
            .extend([
                API_VERSION,
                "Accounts",
                self.config.account_sid.as_str(),
                collection.as_str(),
            ]);
        Ok(url)
    }

    /// Connect callback URL that forwards the answered call to `to_number`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidUrl`] if the app host cannot carry a path.
    pub fn callback_url(&self, to_number: &str) -> Result<Url, GatewayError> {
        let mut url = self.config.app_host.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::InvalidUrl(self.config.app_host.to_string()))?
            .pop_if_empty()
            .extend(CONNECT_PATH);
        url.query_pairs_mut()
            .clear()
            .append_pair(NUMBER_TO_PARAM, to_number);
        Ok(url)
    }

    /// Request that rings `from_number` and, once answered, bridges it to `to_number`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidUrl`] if a URL cannot be built.
    pub fn call_request(
        &self,
        from_number: &str,
        to_number: &str,
    ) -> Result<RequestOptions, GatewayError> {
        let callback = self.callback_url(to_number)?;
        Ok(self
            .authenticated(self.resource_url("Calls")?)
            .with_form_field("From", &self.config.from_number)
            .with_form_field("To", from_number)
            .with_form_field("Url", callback.as_str()))
    }

    /// Request that sends `body` to `to_number`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidUrl`] if the URL cannot be built.
    pub fn message_request(&self, to_number: &str, body: &str) -> Result<RequestOptions, GatewayError> {
        Ok(self
            .authenticated(self.resource_url("Messages")?)
            .with_form_field("From", &self.config.from_number)
            .with_form_field("To", to_number)
            .with_form_field("Body", body))
    }

    /// Returns true if `signature` authenticates the webhook request.
    ///
    /// A missing header never authenticates.
    #[must_use]
    pub fn authenticate_webhook(
        &self,
        request_url: &str,
        payload: &WebhookPayload,
        signature: Option<&str>,
    ) -> bool {
        let signature = signature.unwrap_or(MISSING_SIGNATURE);
        self.validator.validate(request_url, payload, signature)
    }

    /// Answers the connect callback.
    ///
    /// - Not authentic: 401 with the hangup document
    /// - Authentic without a `number_to` query parameter: 400 with the hangup document
    /// - Otherwise: 200 with the dial-forward document
    #[must_use]
    pub fn connect_reply(
        &self,
        request_url: &str,
        payload: &WebhookPayload,
        signature: Option<&str>,
    ) -> WebhookReply {
        if !self.authenticate_webhook(request_url, payload, signature) {
            tracing::warn!("Rejected unauthenticated callback for {request_url}");
            return WebhookReply::hangup(StatusCode::UNAUTHORIZED);
        }

        let Some(number) = forward_target(request_url) else {
            tracing::warn!("Callback {request_url} has no {NUMBER_TO_PARAM} parameter");
            return WebhookReply::hangup(StatusCode::BAD_REQUEST);
        };

        tracing::info!("Forwarding answered call to {number}");
        WebhookReply {
            status: StatusCode::OK,
            body: dial_forward_document(&number),
        }
    }

    /// See [`dial_forward_document`].
    #[must_use]
    pub fn dial_forward_document(&self, number: &str) -> String {
        dial_forward_document(number)
    }

    /// See [`hangup_document`].
    #[must_use]
    pub const fn hangup_document(&self) -> &'static str {
        hangup_document()
    }

    fn authenticated(&self, url: Url) -> RequestOptions {
        RequestOptions::post(url)
            .with_basic_auth(&self.config.account_sid, &self.config.auth_token)
            .with_settings(&self.settings)
    }
}

impl<H: HttpClient, C: Clock> TelephonyGateway<H, C> {
    /// Places a call from the sender number to `from_number`; when answered,
    /// the connect callback forwards it to `to_number`.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Rejected`] for a 4xx answer
    /// - [`GatewayError::Request`] for transport failures and other statuses
    /// - [`GatewayError::InvalidResponse`] if a 2xx body is not JSON
    pub async fn place_call(
        &self,
        from_number: &str,
        to_number: &str,
    ) -> Result<ProviderResource, GatewayError> {
        let options = self.call_request(from_number, to_number)?;
        self.create(&options)
            .await
            .inspect_err(|e| tracing::warn!("Failed to place call to {from_number}: {e}"))
    }

    /// Sends an SMS with `body` to `to_number`.
    ///
    /// # Errors
    ///
    /// See [`TelephonyGateway::place_call`].
    pub async fn send_message(
        &self,
        to_number: &str,
        body: &str,
    ) -> Result<ProviderResource, GatewayError> {
        let options = self.message_request(to_number, body)?;
        self.create(&options)
            .await
            .inspect_err(|e| tracing::warn!("Failed to send message to {to_number}: {e}"))
    }

    /// Sends the verification message for `code` to `to_number`.
    ///
    /// # Errors
    ///
    /// See [`TelephonyGateway::place_call`].
    pub async fn send_verification_code(
        &self,
        to_number: &str,
        code: &str,
    ) -> Result<ProviderResource, GatewayError> {
        self.send_message(to_number, &verification_message(code))
            .await
    }

    async fn create(&self, options: &RequestOptions) -> Result<ProviderResource, GatewayError> {
        let envelope = self
            .requester
            .execute(options)
            .await
            .map_err(GatewayError::from_request)?;

        let body = serde_json::from_str(&envelope.body).map_err(GatewayError::InvalidResponse)?;
        Ok(ProviderResource {
            status_code: envelope.status,
            body,
        })
    }
}

fn forward_target(request_url: &str) -> Option<String> {
    let url = Url::parse(request_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == NUMBER_TO_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
