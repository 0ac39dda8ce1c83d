//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::gateway::GatewayConfig;
use crate::transport::ConnectionSettings;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Provider account settings
    pub gateway: GatewayConfig,

    /// Timeout, proxy and TLS settings for outbound requests
    pub connection: ConnectionSettings,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeout = self
            .connection
            .timeout
            .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()));
        let proxy = self
            .connection
            .proxy
            .as_ref()
            .map_or_else(|| "none".to_string(), ToString::to_string);

        write!(
            f,
            "Config {{ account_sid: {}, auth_token: <redacted>, from_number: {}, api_base: {}, \
             app_host: {}, timeout: {}, proxy: {}, tls_verify: {} }}",
            self.gateway.account_sid,
            self.gateway.from_number,
            self.gateway.api_base,
            self.gateway.app_host,
            timeout,
            proxy,
            self.connection.tls_verify,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (or their environment fallbacks) take precedence over
    /// TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing or empty
    /// - A URL is invalid or not an `http`/`https` base URL
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let twilio = toml.map(|t| &t.twilio);

        let account_sid = resolve_required(
            cli.account_sid.as_deref(),
            twilio.and_then(|t| t.account_sid.as_deref()),
            field::ACCOUNT_SID,
            "Use --account-sid, TWILIO_ACCOUNT_SID or set twilio.account_sid in config file",
        )?;

        let auth_token = resolve_required(
            cli.auth_token.as_deref(),
            twilio.and_then(|t| t.auth_token.as_deref()),
            field::AUTH_TOKEN,
            "Use --auth-token, TWILIO_AUTH_TOKEN or set twilio.auth_token in config file",
        )?;

        let from_number = resolve_required(
            cli.from_number.as_deref(),
            twilio.and_then(|t| t.from_number.as_deref()),
            field::FROM_NUMBER,
            "Use --from-number, TWILIO_NUMBER or set twilio.from_number in config file",
        )?;

        let app_host = resolve_required(
            cli.app_host.as_deref(),
            toml.and_then(|t| t.app.host.as_deref()),
            field::APP_HOST,
            "Use --app-host, APP_HOST or set app.host in config file",
        )?;
        let app_host = parse_base_url(&app_host, field::APP_HOST)?;

        // Priority: CLI explicit > TOML > default
        let api_base = cli
            .api_base
            .as_deref()
            .or_else(|| twilio.and_then(|t| t.api_base.as_deref()))
            .unwrap_or(defaults::API_BASE);
        let api_base = parse_base_url(api_base, field::API_BASE)?;

        let connection = Self::build_connection(cli, toml)?;

        Ok(Self {
            gateway: GatewayConfig {
                account_sid,
                auth_token,
                from_number,
                api_base,
                app_host,
            },
            connection,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn build_connection(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<ConnectionSettings, ConfigError> {
        let http = toml.map(|t| &t.http);

        // Priority: CLI explicit > TOML > default
        let timeout_secs = cli
            .timeout
            .or_else(|| http.and_then(|h| h.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than 0".to_string(),
            });
        }

        let proxy = cli
            .proxy
            .as_deref()
            .or_else(|| http.and_then(|h| h.proxy.as_deref()))
            .map(|p| parse_url(p, field::PROXY))
            .transpose()?;

        // Flag semantics: enabled in either source wins
        let insecure = cli.insecure || http.is_some_and(|h| h.insecure);

        Ok(ConnectionSettings {
            timeout: Some(Duration::from_secs(timeout_secs)),
            proxy,
            tls_verify: !insecure,
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn resolve_required(
    cli: Option<&str>,
    toml: Option<&str>,
    field: &'static str,
    hint: &'static str,
) -> Result<String, ConfigError> {
    cli.or(toml)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::missing(field, hint))
}

fn parse_url(value: &str, field: &'static str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        url: value.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            field,
            url: value.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}

fn parse_base_url(value: &str, field: &'static str) -> Result<Url, ConfigError> {
    let url = parse_url(value, field)?;

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl {
            field,
            url: value.to_string(),
            reason: "base URL must not have a query or fragment".to_string(),
        });
    }

    Ok(url)
}
