use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProduceError;
use crate::hooks::Hooks;
use crate::policies::RetryDetails;

/// Base hooks that log refresh events to stdout.
///
/// Enabled via the `logging` feature. Useful for demos and debugging.
pub struct LogHooks;

#[async_trait]
impl<T: Debug + Send + Sync + 'static> Hooks<T> for LogHooks {
    async fn on_new_value(&self, value: &T, cadence: Duration) {
        println!("[refreshed] value={value:?} next_in={cadence:?}");
    }

    async fn on_refresh_failure(&self, cause: &ProduceError, retry: &RetryDetails) {
        println!(
            "[retrying] attempt={} elapsed={:?} next_delay={:?} cause={cause}",
            retry.attempt, retry.elapsed, retry.next_delay
        );
    }

    async fn on_exhausted_retries(&self, cause: &ProduceError) {
        println!("[exhausted] cause={cause}");
    }
}
