//! # Growing-delay retry policy.
//!
//! [`BackoffPolicy`] computes the delay for a given attempt from three
//! parameters:
//! - [`BackoffPolicy::first`] the delay before the first retry;
//! - [`BackoffPolicy::factor`] the multiplicative growth per attempt;
//! - [`BackoffPolicy::max`] the delay cap.
//!
//! On its own it never gives up; wrap it in
//! [`Limited`](crate::Limited) to bound the retry count.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use freshcell::{BackoffPolicy, JitterPolicy};
//!
//! let backoff = BackoffPolicy {
//!     first: Duration::from_millis(100),
//!     max: Duration::from_secs(10),
//!     factor: 2.0,
//!     jitter: JitterPolicy::None,
//! };
//!
//! assert_eq!(backoff.delay_for(1), Duration::from_millis(100));
//! assert_eq!(backoff.delay_for(2), Duration::from_millis(200));
//! // 100ms * 2^9 = 51.2s, capped at max.
//! assert_eq!(backoff.delay_for(10), Duration::from_secs(10));
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;
use crate::policies::retry::{RetryDecision, RetryPolicy};

/// Retry policy with multiplicatively growing delays.
#[derive(Clone, Copy, Debug)]
pub struct BackoffPolicy {
    /// Delay before the first retry.
    pub first: Duration,
    /// Maximum delay cap.
    pub max: Duration,
    /// Multiplicative growth factor (`>= 1.0` recommended).
    pub factor: f64,
    /// Jitter applied to the computed delay.
    pub jitter: JitterPolicy,
}

impl Default for BackoffPolicy {
    /// Returns a policy with:
    /// - `first = 100ms`;
    /// - `max = 30s`;
    /// - `factor = 1.0` (constant delay);
    /// - no jitter.
    fn default() -> Self {
        Self {
            first: Duration::from_millis(100),
            max: Duration::from_secs(30),
            factor: 1.0,
            jitter: JitterPolicy::None,
        }
    }
}

impl BackoffPolicy {
    /// Computes the (jittered) delay for the given 1-based attempt.
    ///
    /// The un-jittered delay is `first * factor^(attempt - 1)`, capped at
    /// [`BackoffPolicy::max`]. Non-finite intermediate results collapse
    /// to `max`; a negative `factor` collapses to zero.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = self.base_delay(attempt);
        match self.jitter {
            JitterPolicy::Decorrelated => {
                let floor = self.first.min(self.max);
                let prev = if attempt <= 1 {
                    floor
                } else {
                    self.base_delay(attempt - 1)
                };
                self.jitter.apply_decorrelated(floor, prev, self.max)
            }
            _ => self.jitter.apply(base),
        }
    }

    /// Delay for the given attempt before jitter.
    fn base_delay(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(1_000) as i32;
        let secs = self.first.as_secs_f64() * self.factor.powi(exp);
        if !secs.is_finite() || secs >= self.max.as_secs_f64() {
            return self.max;
        }
        if secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(secs)
    }
}

impl RetryPolicy for BackoffPolicy {
    fn decide(&self, attempt: u32, _elapsed: Duration) -> RetryDecision {
        RetryDecision::Delay(self.delay_for(attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(factor: f64) -> BackoffPolicy {
        BackoffPolicy {
            first: Duration::from_millis(100),
            max: Duration::from_secs(10),
            factor,
            jitter: JitterPolicy::None,
        }
    }

    #[test]
    fn constant_factor_keeps_delay_flat() {
        let p = policy(1.0);
        assert_eq!(p.delay_for(1), Duration::from_millis(100));
        assert_eq!(p.delay_for(50), Duration::from_millis(100));
    }

    #[test]
    fn growth_is_capped_at_max() {
        let p = policy(2.0);
        assert_eq!(p.delay_for(1), Duration::from_millis(100));
        assert_eq!(p.delay_for(3), Duration::from_millis(400));
        assert_eq!(p.delay_for(30), Duration::from_secs(10));
        assert_eq!(p.delay_for(u32::MAX), Duration::from_secs(10));
    }

    #[test]
    fn negative_factor_collapses_to_zero() {
        let p = policy(-3.0);
        assert_eq!(p.delay_for(2), Duration::ZERO);
    }

    #[test]
    fn never_gives_up_on_its_own() {
        let p = policy(2.0);
        assert!(matches!(
            p.decide(1_000, Duration::from_secs(3600)),
            RetryDecision::Delay(_)
        ));
    }
}
