//! # Retry policy interface and basic combinators.
//!
//! [`RetryPolicy`] is consulted once per failed producer call with the
//! attempt count and the time elapsed in the current refresh cycle. It
//! answers with a [`RetryDecision`]: wait-then-retry or give up.
//!
//! ## Rules
//! - `attempt` is 1-based and counts failures within one refresh cycle;
//!   it resets after every successful refresh.
//! - `elapsed` is measured from the start of the current cycle, not from
//!   cell acquisition.
//! - Policies must be pure with respect to the cell: the same inputs may
//!   be replayed after a restart.

use std::time::Duration;

/// What the refresher should do after a failed producer call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the given delay, then attempt again.
    Delay(Duration),
    /// Stop retrying; the cell surfaces the failure and the refresher exits.
    GiveUp,
}

/// Metadata handed to the per-failure hook alongside the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryDetails {
    /// Failed attempts so far in this refresh cycle (1-based).
    pub attempt: u32,
    /// Time spent in this refresh cycle so far.
    pub elapsed: Duration,
    /// Delay the policy chose before the next attempt.
    pub next_delay: Duration,
}

/// Decides whether a failed refresh is retried and after what delay.
pub trait RetryPolicy: Send + Sync + 'static {
    /// Returns the decision for the given failed attempt.
    fn decide(&self, attempt: u32, elapsed: Duration) -> RetryDecision;
}

/// Retries forever with a fixed delay between attempts.
///
/// Wrap in [`Limited`] to bound the number of retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantDelay {
    /// Delay between attempts.
    pub delay: Duration,
}

impl ConstantDelay {
    /// Creates a constant-delay policy.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl RetryPolicy for ConstantDelay {
    fn decide(&self, _attempt: u32, _elapsed: Duration) -> RetryDecision {
        RetryDecision::Delay(self.delay)
    }
}

/// Bounds the number of retries of an inner policy.
///
/// Gives up once `attempt` exceeds `retries`; otherwise defers to the
/// inner policy. `retries = 1` means: permit exactly one retry.
#[derive(Debug, Clone, Copy)]
pub struct Limited<P> {
    /// Policy consulted while retries remain.
    pub inner: P,
    /// Maximum number of retried failures per refresh cycle.
    pub retries: u32,
}

impl<P> Limited<P> {
    /// Wraps `inner`, permitting at most `retries` retried failures.
    pub fn new(inner: P, retries: u32) -> Self {
        Self { inner, retries }
    }
}

impl<P: RetryPolicy> RetryPolicy for Limited<P> {
    fn decide(&self, attempt: u32, elapsed: Duration) -> RetryDecision {
        if attempt > self.retries {
            return RetryDecision::GiveUp;
        }
        self.inner.decide(attempt, elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_delay_never_gives_up() {
        let policy = ConstantDelay::new(Duration::from_millis(50));
        for attempt in [1, 2, 100, u32::MAX] {
            assert_eq!(
                policy.decide(attempt, Duration::ZERO),
                RetryDecision::Delay(Duration::from_millis(50)),
            );
        }
    }

    #[test]
    fn limited_gives_up_after_budget() {
        let policy = Limited::new(ConstantDelay::new(Duration::from_millis(10)), 2);
        assert_eq!(
            policy.decide(1, Duration::ZERO),
            RetryDecision::Delay(Duration::from_millis(10)),
        );
        assert_eq!(
            policy.decide(2, Duration::ZERO),
            RetryDecision::Delay(Duration::from_millis(10)),
        );
        assert_eq!(policy.decide(3, Duration::ZERO), RetryDecision::GiveUp);
    }

    #[test]
    fn limited_zero_refuses_first_retry() {
        let policy = Limited::new(ConstantDelay::new(Duration::from_millis(10)), 0);
        assert_eq!(policy.decide(1, Duration::ZERO), RetryDecision::GiveUp);
    }
}
