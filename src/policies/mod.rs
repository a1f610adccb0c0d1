//! # Retry policies for failed refreshes.
//!
//! A [`RetryPolicy`] decides, after each failed producer call, whether
//! the refresher should wait and try again or give up. The crate ships
//! a small library of policies:
//!
//! - [`ConstantDelay`] — retry forever with a fixed delay
//! - [`BackoffPolicy`] — growing delays (first/max/factor) with optional jitter
//! - [`Limited`] — wrapper that bounds the number of retries of any policy
//! - [`JitterPolicy`] — randomization applied by [`BackoffPolicy`]
//!
//! A cell configured without a policy gives up on the first failure.

mod backoff;
mod jitter;
mod retry;

pub use backoff::BackoffPolicy;
pub use jitter::JitterPolicy;
pub use retry::{ConstantDelay, Limited, RetryDecision, RetryDetails, RetryPolicy};
