//! # Lifecycle hooks.
//!
//! [`Hooks`] is the extension point for observing a cell's refresh
//! lifecycle: new values, retried failures, and exhaustion. All methods
//! default to no-ops, so an implementation overrides only what it cares
//! about.
//!
//! ## Rules
//! - Hooks run on the refresher task, serially with respect to one
//!   another.
//! - A panicking hook is caught, reported on stderr, and never breaks
//!   the refresh loop.
//! - Readers may observe the slot before or after a given hook runs;
//!   only the slot write order is guaranteed.

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogHooks;

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;

use crate::error::ProduceError;
use crate::policies::RetryDetails;

/// Observer of a cell's refresh lifecycle.
///
/// ### Invocation guarantees
/// - [`on_new_value`](Self::on_new_value) — exactly once per successful
///   refresh, with the published value and the cadence derived from it.
///   Never called for the initial synchronous production, and never with
///   an error or cancelled snapshot.
/// - [`on_refresh_failure`](Self::on_refresh_failure) — once per failed
///   producer call that the retry policy decided to retry.
/// - [`on_exhausted_retries`](Self::on_exhausted_retries) — exactly once
///   per refresher that stops because its policy gave up, after the
///   error snapshot is visible to readers.
#[async_trait]
pub trait Hooks<T>: Send + Sync + 'static {
    /// Called after each successful refresh with the stored value and
    /// the wait before the next refresh. Defaults to a no-op.
    async fn on_new_value(&self, _value: &T, _cadence: Duration) {}

    /// Called for each failed producer call that will be retried.
    /// Defaults to a no-op.
    async fn on_refresh_failure(&self, _cause: &ProduceError, _retry: &RetryDetails) {}

    /// Called when the retry policy gives up and the refresher stops.
    /// Defaults to a no-op.
    async fn on_exhausted_retries(&self, _cause: &ProduceError) {}
}

/// Hooks implementation that ignores every event.
pub struct NoopHooks;

#[async_trait]
impl<T> Hooks<T> for NoopHooks {}

/// Runs one hook invocation with panic isolation.
///
/// A hook that panics must not take the refresh loop down with it; the
/// panic is caught and reported the way a crashed subscriber would be.
pub(crate) async fn shielded(hook: &'static str, fut: impl Future<Output = ()>) {
    if let Err(panic) = AssertUnwindSafe(fut).catch_unwind().await {
        eprintln!("[freshcell] hook '{hook}' panicked: {panic:?}");
    }
}
