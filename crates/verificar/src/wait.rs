//! Bounded-time condition polling.
//!
//! [`ConditionWaiter`] re-evaluates a boolean check against an expected
//! result until it holds or a [`Timeout`] elapses. The blocking primitive is
//! injected behind [`BoundedWait`]; [`PollingWait`] is the default
//! check-then-sleep implementation.
//!
//! ## Toyota Way Application
//!
//! - **Jidoka**: automatic detection of the satisfied state
//! - **Muda**: the fast path avoids paying a full timeout for conditions
//!   that already hold, which is essential for negative assertions

use std::time::{Duration, Instant};

use crate::result::{VerificarError, VerificarResult};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// TIMEOUT
// =============================================================================

/// Named wait durations, chosen per call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeout {
    /// Screen transitions and slow content loads (20 seconds)
    Loading,
    /// Ordinary state settling (3 seconds)
    #[default]
    Normal,
    /// Conditions expected to already hold (1 second)
    Short,
}

impl Timeout {
    /// Get the wait duration
    #[must_use]
    pub const fn duration(&self) -> Duration {
        match self {
            Self::Loading => Duration::from_secs(20),
            Self::Normal => Duration::from_secs(3),
            Self::Short => Duration::from_secs(1),
        }
    }

    /// Get the timeout name used in diagnostics
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Normal => "normal",
            Self::Short => "short",
        }
    }
}

impl std::fmt::Display for Timeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// BOUNDED WAIT PRIMITIVE
// =============================================================================

/// The injected blocking primitive: block the calling thread until `check`
/// returns true or `timeout` elapses, reporting whether it did.
///
/// This is the engine's sole suspension point. There is no cancellation
/// hook; a caller cannot abort a wait early.
pub trait BoundedWait {
    /// Block until `check` holds or `timeout` elapses
    fn block_until(&self, check: &dyn Fn() -> bool, timeout: Duration) -> bool;
}

/// Default [`BoundedWait`]: re-check at a fixed poll interval until the
/// deadline.
#[derive(Debug, Clone)]
pub struct PollingWait {
    poll_interval: Duration,
}

impl Default for PollingWait {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl PollingWait {
    /// Create a poller with the default interval
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Wait for a condition, converting expiry into an error.
    ///
    /// # Errors
    ///
    /// Returns [`VerificarError::Timeout`] when the condition did not hold
    /// before `timeout` elapsed.
    pub fn wait_until<F>(&self, check: F, timeout: Duration) -> VerificarResult<()>
    where
        F: Fn() -> bool,
    {
        if self.block_until(&check, timeout) {
            Ok(())
        } else {
            Err(VerificarError::Timeout {
                ms: timeout.as_millis() as u64,
            })
        }
    }
}

impl BoundedWait for PollingWait {
    fn block_until(&self, check: &dyn Fn() -> bool, timeout: Duration) -> bool {
        let start = Instant::now();
        while start.elapsed() < timeout {
            if check() {
                return true;
            }
            std::thread::sleep(self.poll_interval);
        }
        false
    }
}

// =============================================================================
// WAIT OUTCOME
// =============================================================================

/// Result of one wait: whether the condition met the expectation before the
/// timeout, and how long the wait took.
///
/// Produced exactly once per invocation; the waiter never retries past the
/// timeout. Retry, if any, is the caller's responsibility.
#[derive(Debug, Clone, Copy)]
pub struct WaitOutcome {
    satisfied: bool,
    elapsed: Duration,
}

impl WaitOutcome {
    /// Whether the condition met the expectation before expiry
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    /// Time spent waiting
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

// =============================================================================
// CONDITION WAITER
// =============================================================================

/// Polls a boolean condition against an expected result within a bounded
/// timeout.
///
/// The fast path returns immediately when the condition already matches the
/// expectation, without invoking the blocking primitive. That keeps negative
/// assertions ("the spinner is gone") from paying the full timeout when the
/// state is already correct.
///
/// # Example
///
/// ```
/// use verificar::{ConditionWaiter, Timeout};
///
/// let waiter = ConditionWaiter::new();
/// let outcome = waiter.wait(|| true, true, Timeout::Short);
/// assert!(outcome.is_satisfied());
/// ```
pub struct ConditionWaiter {
    primitive: Box<dyn BoundedWait>,
}

impl std::fmt::Debug for ConditionWaiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionWaiter").finish_non_exhaustive()
    }
}

impl Default for ConditionWaiter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionWaiter {
    /// Create a waiter backed by the default [`PollingWait`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            primitive: Box::new(PollingWait::new()),
        }
    }

    /// Create a waiter backed by a custom blocking primitive
    #[must_use]
    pub fn with_primitive(primitive: Box<dyn BoundedWait>) -> Self {
        Self { primitive }
    }

    /// Wait for `check` to equal `expected`, fast path included.
    ///
    /// If the condition already matches at call time, returns satisfied
    /// immediately without touching the blocking primitive. Otherwise hands
    /// the condition to the primitive for up to `timeout`.
    pub fn wait<F>(&self, check: F, expected: bool, timeout: Timeout) -> WaitOutcome
    where
        F: Fn() -> bool,
    {
        self.wait_inner(check, expected, timeout, false)
    }

    /// Wait for `check` to equal `expected`, skipping the fast path.
    ///
    /// Always hands the condition to the blocking primitive, even when it
    /// already holds. Use when the full settling window must elapse.
    pub fn wait_full<F>(&self, check: F, expected: bool, timeout: Timeout) -> WaitOutcome
    where
        F: Fn() -> bool,
    {
        self.wait_inner(check, expected, timeout, true)
    }

    fn wait_inner<F>(&self, check: F, expected: bool, timeout: Timeout, slow: bool) -> WaitOutcome
    where
        F: Fn() -> bool,
    {
        let start = Instant::now();

        if !slow && check() == expected {
            tracing::trace!(timeout = %timeout, "condition already satisfied, skipping wait");
            return WaitOutcome {
                satisfied: true,
                elapsed: start.elapsed(),
            };
        }

        let satisfied = self
            .primitive
            .block_until(&|| check() == expected, timeout.duration());

        if !satisfied {
            tracing::debug!(
                timeout = %timeout,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "condition not met before timeout"
            );
        }

        WaitOutcome {
            satisfied,
            elapsed: start.elapsed(),
        }
    }
}
