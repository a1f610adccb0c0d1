//! # Jitter for retry delays.
//!
//! [`JitterPolicy`] randomizes backoff delays so that many cells
//! refreshing against the same upstream do not retry in lockstep.
//!
//! - [`JitterPolicy::None`] exact delays, predictable timing
//! - [`JitterPolicy::Full`] random in `[0, delay]`
//! - [`JitterPolicy::Equal`] `delay/2 + random[0, delay/2]`
//! - [`JitterPolicy::Decorrelated`] random in `[base, prev * 3]`, capped

use std::time::Duration;

use rand::Rng;

/// Randomization applied to a computed retry delay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// Use the exact delay. Predictable; fine when only one cell retries.
    #[default]
    None,
    /// Random delay in `[0, delay]`. Maximum spread, may retry immediately.
    Full,
    /// `delay/2` plus random up to `delay/2`. Preserves most of the
    /// backoff while still spreading retries.
    Equal,
    /// Random in `[base, prev * 3]`, capped at the policy maximum.
    /// Needs the previous delay; use
    /// [`apply_decorrelated`](Self::apply_decorrelated).
    Decorrelated,
}

impl JitterPolicy {
    /// Applies jitter to `delay`.
    ///
    /// `Decorrelated` is a no-op here because it needs more context;
    /// callers with a previous delay use
    /// [`apply_decorrelated`](Self::apply_decorrelated) instead.
    pub fn apply(&self, delay: Duration) -> Duration {
        let ms = saturating_ms(delay);
        match self {
            JitterPolicy::None | JitterPolicy::Decorrelated => delay,
            JitterPolicy::Full => {
                if ms == 0 {
                    return Duration::ZERO;
                }
                Duration::from_millis(rand::rng().random_range(0..=ms))
            }
            JitterPolicy::Equal => {
                let half = ms / 2;
                if half == 0 {
                    return delay;
                }
                Duration::from_millis(half + rand::rng().random_range(0..=half))
            }
        }
    }

    /// Applies decorrelated jitter: random in `[base, prev * 3]`, capped
    /// at `max` and never below `base`.
    ///
    /// Falls back to [`apply`](Self::apply)`(base)` for other variants.
    pub fn apply_decorrelated(&self, base: Duration, prev: Duration, max: Duration) -> Duration {
        if !matches!(self, JitterPolicy::Decorrelated) {
            return self.apply(base);
        }

        let base_ms = saturating_ms(base);
        let upper = saturating_ms(prev)
            .saturating_mul(3)
            .min(saturating_ms(max))
            .max(base_ms);
        if base_ms >= upper {
            return base;
        }
        Duration::from_millis(rand::rng().random_range(base_ms..=upper))
    }
}

/// Milliseconds of `d`, saturated to `u64`.
fn saturating_ms(d: Duration) -> u64 {
    d.as_millis().min(u128::from(u64::MAX)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1_000);

    #[test]
    fn none_is_identity() {
        assert_eq!(JitterPolicy::None.apply(DELAY), DELAY);
    }

    #[test]
    fn full_stays_within_bounds() {
        for _ in 0..100 {
            let jittered = JitterPolicy::Full.apply(DELAY);
            assert!(jittered <= DELAY);
        }
    }

    #[test]
    fn equal_keeps_at_least_half() {
        for _ in 0..100 {
            let jittered = JitterPolicy::Equal.apply(DELAY);
            assert!(jittered >= DELAY / 2);
            assert!(jittered <= DELAY);
        }
    }

    #[test]
    fn decorrelated_respects_floor_and_cap() {
        let base = Duration::from_millis(100);
        let max = Duration::from_millis(500);
        for _ in 0..100 {
            let jittered =
                JitterPolicy::Decorrelated.apply_decorrelated(base, Duration::from_millis(300), max);
            assert!(jittered >= base);
            assert!(jittered <= max);
        }
    }

    #[test]
    fn zero_delay_stays_zero() {
        assert_eq!(JitterPolicy::Full.apply(Duration::ZERO), Duration::ZERO);
        assert_eq!(JitterPolicy::Equal.apply(Duration::ZERO), Duration::ZERO);
    }
}
