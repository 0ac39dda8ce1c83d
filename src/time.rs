//! Time abstraction for request timing.
//!
//! The [`Clock`] trait lets tests drive the start/end readings taken around
//! each outbound request instead of depending on real elapsed time.

use std::time::SystemTime;

/// Source of wall-clock readings.
///
/// # Example
///
/// ```
/// use phone_relay::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// Production clock delegating to [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Clock that advances by a fixed step on every reading.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct SteppingClock {
    millis: std::sync::atomic::AtomicU64,
    step_millis: u64,
}

#[cfg(test)]
impl SteppingClock {
    /// First reading is `start_millis` after the epoch.
    pub(crate) const fn new(start_millis: u64, step_millis: u64) -> Self {
        Self {
            millis: std::sync::atomic::AtomicU64::new(start_millis),
            step_millis,
        }
    }
}

#[cfg(test)]
impl Clock for SteppingClock {
    fn now(&self) -> SystemTime {
        let millis = self
            .millis
            .fetch_add(self.step_millis, std::sync::atomic::Ordering::SeqCst);
        SystemTime::UNIX_EPOCH + std::time::Duration::from_millis(millis)
    }
}
