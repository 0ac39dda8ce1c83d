//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.
//! Account settings fall back to environment variables when the flag is absent.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use super::defaults;

/// phone-relay: Twilio call forwarding and SMS verification
///
/// Places forwarded calls, sends verification codes and authenticates
/// Twilio webhook callbacks.
#[derive(Debug, Parser)]
#[command(name = "phone-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Twilio account SID
    #[arg(long = "account-sid", env = "TWILIO_ACCOUNT_SID", global = true)]
    pub account_sid: Option<String>,

    /// Twilio auth token (API password and webhook signing key)
    #[arg(
        long = "auth-token",
        env = "TWILIO_AUTH_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub auth_token: Option<String>,

    /// Sender phone number for calls and messages
    #[arg(long = "from-number", env = "TWILIO_NUMBER", global = true)]
    pub from_number: Option<String>,

    /// Twilio REST API base URL
    #[arg(long = "api-base", env = "TWILIO_API_BASE", global = true)]
    pub api_base: Option<String>,

    /// Public base URL of this application, used for call callbacks
    #[arg(long = "app-host", env = "APP_HOST", global = true)]
    pub app_host: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Proxy URL for outbound requests
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for phone-relay
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Ring a number and forward the answered call to another
    Call {
        /// Number to ring first
        #[arg(long)]
        from: String,

        /// Number the answered call is forwarded to
        #[arg(long)]
        to: String,
    },

    /// Send an SMS
    Sms(SmsArgs),

    /// Authenticate a connect callback and print the reply document
    Verify(VerifyArgs),

    /// Print a call-control document
    Twiml {
        /// Document to print
        #[command(subcommand)]
        document: TwimlCommand,
    },
}

/// Arguments of the `sms` subcommand.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("content").required(true).args(["body", "code"])))]
pub struct SmsArgs {
    /// Recipient number
    #[arg(long)]
    pub to: String,

    /// Message text
    #[arg(long)]
    pub body: Option<String>,

    /// Send a freshly generated verification code instead of a text
    #[arg(long)]
    pub code: bool,

    /// Digits in the generated code
    #[arg(
        long = "code-length",
        default_value_t = defaults::CODE_LENGTH,
        value_parser = clap::value_parser!(u8).range(4..=10)
    )]
    pub code_length: u8,
}

/// Arguments of the `verify` subcommand.
#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Full callback URL as the provider requested it
    #[arg(long)]
    pub url: String,

    /// Value of the X-Twilio-Signature header
    #[arg(long)]
    pub signature: Option<String>,

    /// Form parameter of the callback (can be specified multiple times)
    #[arg(long = "param", value_name = "K=V", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// File holding a raw (non-form) callback body
    #[arg(long = "body-file", conflicts_with = "params")]
    pub body_file: Option<PathBuf>,

    /// Content type the callback body was sent with
    ///
    /// A form-encoded body is checked parameter by parameter; any other
    /// body is checked against the `bodySHA256` query parameter.
    #[arg(long = "content-type", requires = "body_file")]
    pub content_type: Option<String>,
}

/// Call-control documents.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum TwimlCommand {
    /// Forward the call to a number
    Dial {
        /// Forwarding target
        number: String,
    },
    /// End the call
    Hangup,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if the command runs without account configuration.
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        matches!(self.command, Command::Init { .. } | Command::Twiml { .. })
    }
}

/// Parses a `Key=Value` pair; the value may be empty or contain `=`.
fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("invalid parameter '{s}': expected 'Key=Value'"))
}
