//! Retry policy and backoff sleeping.
//!
//! Seller Center calls are retried with a linear backoff: before attempt `i`
//! (1-based) the client sleeps `(i - 1) * backoff_step`. With the defaults that
//! is 0, 200, 400, 600 and 800 milliseconds across five attempts.

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

/// Default maximum number of attempts per call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default linear backoff step.
pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_millis(200);

/// Configuration for retry behavior.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use seller_center::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 5);
/// assert_eq!(policy.delay_before(1), Duration::ZERO);
/// assert_eq!(policy.delay_before(3), Duration::from_millis(400));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_step: DEFAULT_BACKOFF_STEP,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy. `max_attempts` is clamped to at least one.
    #[must_use]
    pub fn new(max_attempts: u32, backoff_step: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_step,
        }
    }

    /// A policy that makes a single attempt.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            backoff_step: Duration::ZERO,
        }
    }

    /// Returns the maximum number of attempts.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the backoff step.
    #[must_use]
    pub const fn backoff_step(&self) -> Duration {
        self.backoff_step
    }

    /// Returns the delay to wait before the 1-based `attempt`.
    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.backoff_step.saturating_mul(attempt.saturating_sub(1))
    }
}

/// Sleeps between retry attempts.
///
/// The client always awaits the sleeper before an attempt, including the
/// zero-length wait before the first one.
#[async_trait]
pub trait Sleep: Send + Sync + Debug {
    /// Waits for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleep;

#[async_trait]
impl Sleep for TokioSleep {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
