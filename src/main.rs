//! phone-relay: Twilio call forwarding and SMS verification
//!
//! Entry point for the phone-relay application.

use phone_relay::config::{Cli, Command, ValidatedConfig};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, exit_code_for, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Init and document commands need no account
    if cli.is_offline() {
        setup_tracing(cli.verbose);
        return finish(run::execute_offline(&cli.command, &mut std::io::stdout().lock()));
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_application(&cli.command, config)
}

/// Runs an account command with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(command: &Command, config: ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    finish(runtime.block_on(run::execute(command, config)))
}

/// Reports the result and picks the exit code.
fn finish(result: Result<run::Outcome, run::RunError>) -> ExitCode {
    match &result {
        Ok(run::Outcome::Rejected(status)) => tracing::warn!("Callback rejected with {status}"),
        Err(e) => tracing::error!("Application error: {e}"),
        Ok(run::Outcome::Completed) => {}
    }
    exit_code_for(&result)
}
