//! Configuration layer for phone-relay.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values passed on the command line
//! 2. **Environment variables** - Fallback for the account settings
//!    (`TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_NUMBER`,
//!    `TWILIO_API_BASE`, `APP_HOST`)
//! 3. **TOML config file** - Values from the configuration file
//! 4. **Built-in defaults** - Hardcoded default values
//!
//! Required fields (`account_sid`, `auth_token`, `from_number`, `app_host`)
//! have no default; a blank value counts as missing.
//!
//! # Boolean Flag Semantics
//!
//! `--insecure` uses OR semantics: if set `true` in either CLI or TOML, TLS
//! verification is off. The CLI cannot turn it back on.
//!
//! # Secrets
//!
//! The auth token is redacted from `Debug` and `Display` output and its
//! environment value is hidden from `--help`.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, SmsArgs, TwimlCommand, VerifyArgs};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
