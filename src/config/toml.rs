//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Provider account section
    #[serde(default)]
    pub twilio: TwilioSection,

    /// Application section
    #[serde(default)]
    pub app: AppSection,

    /// Outbound HTTP section
    #[serde(default)]
    pub http: HttpSection,
}

/// Provider account section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwilioSection {
    /// Account SID
    pub account_sid: Option<String>,

    /// Auth token
    pub auth_token: Option<String>,

    /// Sender phone number
    pub from_number: Option<String>,

    /// REST API base URL
    pub api_base: Option<String>,
}

/// Application section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    /// Public base URL of this application
    pub host: Option<String>,
}

/// Outbound HTTP section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// Proxy URL
    pub proxy: Option<String>,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# phone-relay Configuration File
#
# Every value can also be given on the command line; account settings
# additionally fall back to environment variables.

[twilio]
# Account SID (required, env: TWILIO_ACCOUNT_SID)
# account_sid = "ACxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"

# Auth token (required, env: TWILIO_AUTH_TOKEN)
# Used as the API password and to verify webhook signatures.
# auth_token = "your-auth-token"

# Sender number for calls and messages (required, env: TWILIO_NUMBER)
# from_number = "+15559990000"

# REST API base URL (default: https://api.twilio.com, env: TWILIO_API_BASE)
# api_base = "https://api.twilio.com"

[app]
# Public base URL of this application (required, env: APP_HOST)
# Answered calls are forwarded through <host>/twilio/connect.
# host = "https://relay.example.com"

[http]
# Request timeout in seconds (default: 30)
timeout = 30

# Proxy for outbound requests
# proxy = "http://proxy.internal:3128"

# Skip TLS certificate verification
# insecure = false
"#
    .to_string()
}
