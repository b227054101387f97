//! Wait mechanisms for render synchronization.
//!
//! Every UI-observing call may suspend until the awaited element or text
//! becomes available, bounded by a timeout. Polling is the only suspension
//! point; a timed-out wait aborts just that operation and propagates as
//! [`VerdadError::Timeout`] to the enclosing step.

use std::time::{Duration, Instant};

use crate::result::{VerdadError, VerdadResult};

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll-based waiter
#[derive(Debug, Clone, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Create a waiter with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom options
    #[must_use]
    pub const fn with_options(options: WaitOptions) -> Self {
        Self { options }
    }

    /// Poll `probe` until it yields a value or the timeout elapses.
    ///
    /// The probe runs at least once, so a condition that already holds
    /// never sleeps.
    ///
    /// # Errors
    ///
    /// Returns [`VerdadError::Timeout`] carrying `waiting_for` if the probe
    /// never yields inside the budget.
    pub fn wait_for<T>(
        &self,
        waiting_for: &str,
        mut probe: impl FnMut() -> Option<T>,
    ) -> VerdadResult<T> {
        let start = Instant::now();
        loop {
            if let Some(value) = probe() {
                return Ok(value);
            }
            if start.elapsed() >= self.options.timeout() {
                return Err(VerdadError::Timeout {
                    ms: self.options.timeout_ms,
                    waiting_for: waiting_for.to_string(),
                });
            }
            std::thread::sleep(self.options.poll_interval());
        }
    }

    /// Poll until `condition` holds.
    ///
    /// # Errors
    ///
    /// Returns [`VerdadError::Timeout`] if the condition never holds inside
    /// the budget.
    pub fn wait_until(
        &self,
        waiting_for: &str,
        mut condition: impl FnMut() -> bool,
    ) -> VerdadResult<()> {
        self.wait_for(waiting_for, || condition().then_some(()))
    }
}
