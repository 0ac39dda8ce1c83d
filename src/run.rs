//! Application execution logic.
//!
//! This module runs one subcommand: a provider request, a callback
//! verification, or an offline document/template operation.

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use phone_relay::config::{
    Command, ConfigError, SmsArgs, TwimlCommand, ValidatedConfig, VerifyArgs, write_default_config,
};
use phone_relay::gateway::{
    GatewayError, ProviderResource, TelephonyGateway, dial_forward_document, hangup_document,
};
use phone_relay::signature::{WebhookParams, WebhookPayload};
use phone_relay::time::Clock;
use phone_relay::transport::{HttpClient, ReqwestClient};
use phone_relay::verification::generate_code;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// A provider operation failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Writing the config template failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The callback body file could not be read.
    #[error("Failed to read body file '{}': {source}", path.display())]
    BodyFile {
        /// Path of the body file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// An account command reached the offline path.
    #[error("This command requires account configuration")]
    NeedsAccount,
}

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked.
    Completed,
    /// The callback was answered with a non-2xx status.
    Rejected(http::StatusCode),
}

/// Runs an account command against the live provider API.
///
/// # Errors
///
/// See [`execute_with`].
///
/// Excluded from coverage - performs real network requests.
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: &Command, config: ValidatedConfig) -> Result<Outcome, RunError> {
    let gateway =
        TelephonyGateway::new(ReqwestClient::new(), config.gateway).with_settings(config.connection);
    let mut stdout = std::io::stdout().lock();
    execute_with(&gateway, command, &mut stdout).await
}

/// Runs `command` through `gateway`, writing results to `out`.
///
/// # Errors
///
/// Returns an error if a provider request fails, the body file cannot be
/// read, or output cannot be written. A rejected callback is an
/// [`Outcome`], not an error.
pub async fn execute_with<H, C, W>(
    gateway: &TelephonyGateway<H, C>,
    command: &Command,
    out: &mut W,
) -> Result<Outcome, RunError>
where
    H: HttpClient,
    C: Clock,
    W: Write,
{
    match command {
        Command::Call { from, to } => {
            let call = gateway.place_call(from, to).await?;
            writeln!(out, "Call placed: {}", describe(&call))?;
            Ok(Outcome::Completed)
        }
        Command::Sms(args) => send_sms(gateway, args, out).await,
        Command::Verify(args) => verify(gateway, args, out),
        Command::Init { .. } | Command::Twiml { .. } => execute_offline(command, out),
    }
}

/// Runs a command that needs no account configuration.
///
/// # Errors
///
/// Returns [`RunError::NeedsAccount`] for account commands, or an error if
/// the template or output cannot be written.
pub fn execute_offline<W: Write>(command: &Command, out: &mut W) -> Result<Outcome, RunError> {
    match command {
        Command::Init { output } => {
            write_default_config(output)?;
            writeln!(
                out,
                "Configuration template written to: {}",
                output.display()
            )?;
        }
        Command::Twiml { document } => writeln!(out, "{}", render_document(document))?,
        Command::Call { .. } | Command::Sms(_) | Command::Verify(_) => {
            return Err(RunError::NeedsAccount);
        }
    }
    Ok(Outcome::Completed)
}

/// Renders the requested call-control document.
#[must_use]
pub fn render_document(document: &TwimlCommand) -> String {
    match document {
        TwimlCommand::Dial { number } => dial_forward_document(number),
        TwimlCommand::Hangup => hangup_document().to_string(),
    }
}

async fn send_sms<H, C, W>(
    gateway: &TelephonyGateway<H, C>,
    args: &SmsArgs,
    out: &mut W,
) -> Result<Outcome, RunError>
where
    H: HttpClient,
    C: Clock,
    W: Write,
{
    if let Some(body) = &args.body {
        let message = gateway.send_message(&args.to, body).await?;
        writeln!(out, "Message sent: {}", describe(&message))?;
    } else {
        let code = generate_code(args.code_length.into());
        let message = gateway.send_verification_code(&args.to, &code).await?;
        writeln!(out, "Verification code {code} sent: {}", describe(&message))?;
    }
    Ok(Outcome::Completed)
}

fn verify<H, C, W: Write>(
    gateway: &TelephonyGateway<H, C>,
    args: &VerifyArgs,
    out: &mut W,
) -> Result<Outcome, RunError> {
    let payload = callback_payload(args)?;
    let reply = gateway.connect_reply(&args.url, &payload, args.signature.as_deref());

    tracing::info!("Callback answered with {}", reply.status);
    writeln!(out, "{}", reply.body)?;

    if reply.is_success() {
        Ok(Outcome::Completed)
    } else {
        Ok(Outcome::Rejected(reply.status))
    }
}

fn callback_payload(args: &VerifyArgs) -> Result<WebhookPayload, RunError> {
    if let Some(path) = &args.body_file {
        let body = std::fs::read_to_string(path).map_err(|source| RunError::BodyFile {
            path: path.clone(),
            source,
        })?;
        return Ok(WebhookPayload::from_body(args.content_type.as_deref(), &body));
    }

    Ok(WebhookPayload::Form(WebhookParams::from_pairs(
        args.params.iter().cloned(),
    )))
}

fn describe(resource: &ProviderResource) -> String {
    match (resource.sid(), resource.status()) {
        (Some(sid), Some(status)) => format!("{sid} ({status})"),
        (Some(sid), None) => sid.to_string(),
        _ => format!("HTTP {}", resource.status_code.as_u16()),
    }
}
