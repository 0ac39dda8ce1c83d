//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use phone_relay::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::run::{Outcome, RunError};

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing required fields, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - network failure, provider rejection, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Webhook rejected (exit code 3) - the callback failed authentication or validation.
    pub fn webhook_rejected() -> ExitCode {
        ExitCode::from(3)
    }
}

/// Maps a command result to the process exit code.
pub fn exit_code_for(result: &Result<Outcome, RunError>) -> std::process::ExitCode {
    match result {
        Ok(Outcome::Completed) => exit_code::SUCCESS,
        Ok(Outcome::Rejected(_)) => exit_code::webhook_rejected(),
        Err(RunError::Config(_)) => exit_code::CONFIG_ERROR,
        Err(_) => exit_code::runtime_error(),
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } => {
            if *f == field::ACCOUNT_SID || *f == field::AUTH_TOKEN {
                eprintln!("\nFind both values on the Twilio console dashboard.");
            }
            eprintln!("\nRun 'phone-relay init' to generate a configuration template.");
        }
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'phone-relay init' to generate a configuration template.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only command output.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
