//! Provider account settings.

use std::fmt;

use url::Url;

/// Default REST API host.
pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// REST API version segment.
pub const API_VERSION: &str = "2010-04-01";

/// Account credentials and hosts used by [`TelephonyGateway`](super::TelephonyGateway).
///
/// Built once at startup from validated configuration and never changed.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Account identifier (`AC...`), also the Basic auth user name
    pub account_sid: String,
    /// Auth token: Basic auth password and webhook signing key
    pub auth_token: String,
    /// Sender number for calls and messages
    pub from_number: String,
    /// REST API base URL
    pub api_base: Url,
    /// Public base URL of this application, used for callbacks
    pub app_host: Url,
}

impl GatewayConfig {
    /// Creates a config with the default API base.
    #[must_use]
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
        app_host: Url,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
            api_base: default_api_base(),
            app_host,
        }
    }

    /// Overrides the REST API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from_number", &self.from_number)
            .field("api_base", &self.api_base.as_str())
            .field("app_host", &self.app_host.as_str())
            .finish()
    }
}

/// Parses [`DEFAULT_API_BASE`].
///
/// # Panics
///
/// Never panics; the constant is a valid URL.
#[must_use]
pub fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL")
}
