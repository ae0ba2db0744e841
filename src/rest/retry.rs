//! Retry policy shared by every retried call.

use std::time::Duration;

use crate::error::BithumbError;

/// Bounded, fixed-delay retry policy.
///
/// Only failures for which [`BithumbError::is_retryable`] holds are retried:
/// transport errors, timeouts and undecodable responses. Exchange
/// rejections are returned immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Delay between attempts used by the default policy.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

    /// Create a policy making at most `max_attempts` attempts (at least one),
    /// sleeping `delay` between them.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A policy that makes a single attempt.
    pub fn never() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Maximum number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay between attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a failure on attempt number `attempt` (1-based) should be retried.
    pub fn should_retry(&self, attempt: u32, error: &BithumbError) -> bool {
        attempt < self.max_attempts && error.is_retryable()
    }
}

impl Default for RetryPolicy {
    /// Two attempts, three seconds apart.
    fn default() -> Self {
        Self::new(2, Self::DEFAULT_DELAY)
    }
}
