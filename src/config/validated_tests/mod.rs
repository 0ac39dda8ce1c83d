//! Tests for validated configuration.

use clap::Parser;

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

/// Account flags that satisfy every required field except the app host
const ACCOUNT_ARGS: [&str; 6] = [
    "--account-sid",
    "AC123",
    "--auth-token",
    "secret",
    "--from-number",
    "+15559990000",
];

const APP_HOST: &str = "https://relay.example.com";

/// Helper to create CLI args from a slice; runs an offline subcommand
///
/// Parse errors fail the calling test instead of exiting the process.
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["phone-relay"];
    full_args.extend(args);
    full_args.extend(["twiml", "hangup"]);
    Cli::try_parse_from(full_args).unwrap_or_else(|e| panic!("CLI args rejected: {e}"))
}

/// Helper to create CLI args with every required field plus `extra`
fn full_cli(extra: &[&str]) -> Cli {
    cli_with_app_host(APP_HOST, extra)
}

/// Like [`full_cli`], with `app_host` given as the application host
fn cli_with_app_host(app_host: &str, extra: &[&str]) -> Cli {
    let mut args = ACCOUNT_ARGS.to_vec();
    args.extend(["--app-host", app_host]);
    args.extend(extra);
    cli(&args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}
