//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

pub use crate::gateway::DEFAULT_API_BASE as API_BASE;

/// Default config file written by `init`.
pub const CONFIG_FILE: &str = "phone-relay.toml";

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default verification code length.
#[allow(clippy::cast_possible_truncation)] // 6 fits in u8
pub const CODE_LENGTH: u8 = crate::verification::DEFAULT_CODE_LENGTH as u8;

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
