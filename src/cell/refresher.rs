//! # Background refresh loop.
//!
//! One [`Refresher`] instance drives one stretch of a cell's life:
//! wait the cadence, produce, publish — retrying failures per policy —
//! until cancelled, superseded, or exhausted. Restart never revives an
//! instance; it spawns a new one with the next generation.
//!
//! ## State machine
//!
//! ```text
//! [Running(v)] --cadence elapsed--> [Refreshing]
//! [Refreshing] --produce ok-------> [Running(v')]   (publish, reset attempts)
//! [Refreshing] --produce fail-----> policy: Delay --> sleep --> [Refreshing]
//!                                   policy: GiveUp -> [Exhausted]  (terminal)
//! any --cancel / restart----------> exit            (terminal)
//! ```
//!
//! ## Rules
//! - The slot is **not** written on intermediate failed attempts; the
//!   stale `Success` stays visible until the policy gives up.
//! - Every suspension point (cadence wait, producer call, retry sleep,
//!   combine) races the instance token, so cancellation is prompt.
//! - Publishing names the instance's generation; once superseded or
//!   terminal, the write is refused and the instance exits silently.
//! - The instance holds the shared state only weakly: when the last
//!   controller is dropped, the loop winds down instead of refreshing
//!   a value nobody can read.

use std::sync::{Arc, Weak};

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::cell::shared::{CadenceFn, CombineFn, Shared};
use crate::error::ProduceError;
use crate::hooks::{shielded, Hooks};
use crate::policies::{RetryDecision, RetryDetails, RetryPolicy};
use crate::produce::ProducerRef;
use crate::value::CachedValue;

/// Outcome of one refresh cycle (one success or one exhausted retry run).
enum Cycle<T> {
    /// A value was published; carries it for the next cadence.
    Published(T),
    /// The retry policy gave up on this cycle.
    GaveUp(ProduceError),
    /// Cancelled, restarted over, or the cell was dropped.
    Superseded,
}

/// One background refresher instance.
pub(crate) struct Refresher<T> {
    shared: Weak<Shared<T>>,
    producer: ProducerRef<T>,
    cadence: Arc<CadenceFn<T>>,
    retry: Option<Arc<dyn RetryPolicy>>,
    hooks: Arc<dyn Hooks<T>>,
    combine: Option<CombineFn<T>>,
    generation: u64,
}

impl<T: Clone + Send + Sync + 'static> Refresher<T> {
    /// Builds an instance for `generation` from the shared config.
    ///
    /// Config pieces are cloned out so the loop can suspend without
    /// keeping the cell alive.
    pub(crate) fn new(shared: &Arc<Shared<T>>, generation: u64) -> Self {
        Self {
            shared: Arc::downgrade(shared),
            producer: Arc::clone(&shared.config.producer),
            cadence: Arc::clone(&shared.config.cadence),
            retry: shared.config.retry.clone(),
            hooks: Arc::clone(&shared.config.hooks),
            combine: shared.config.combine.clone(),
            generation,
        }
    }

    /// Runs the loop until a terminal transition.
    pub(crate) async fn run(self, token: CancellationToken) {
        // Seeded from the slot: the acquisition value on first start,
        // the last held value after a restart. No on_new_value here.
        let mut wait = match self.snapshot() {
            Some(current) => (self.cadence)(current.value()),
            None => return,
        };

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = time::sleep(wait) => {}
            }

            match self.refresh_cycle(&token).await {
                Cycle::Published(stored) => {
                    wait = (self.cadence)(&stored);
                    shielded("on_new_value", self.hooks.on_new_value(&stored, wait)).await;
                }
                Cycle::GaveUp(cause) => {
                    let exhausted = match self.shared.upgrade() {
                        Some(shared) => shared.exhaust(self.generation, cause.clone()),
                        None => false,
                    };
                    if exhausted {
                        shielded(
                            "on_exhausted_retries",
                            self.hooks.on_exhausted_retries(&cause),
                        )
                        .await;
                    }
                    break;
                }
                Cycle::Superseded => break,
            }
        }
    }

    /// Attempts to produce and publish one new value, retrying failures
    /// per the policy. The attempt counter and elapsed clock are scoped
    /// to this cycle and reset on the next one.
    async fn refresh_cycle(&self, token: &CancellationToken) -> Cycle<T> {
        let started = time::Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let child = token.child_token();
            let cause = tokio::select! {
                produced = self.producer.produce(child.clone()) => match produced {
                    Ok(value) => return self.store(token, value).await,
                    Err(cause) => cause,
                },
                _ = token.cancelled() => {
                    child.cancel();
                    return Cycle::Superseded;
                }
            };

            // Absent policy: give up on the first failure.
            let decision = match &self.retry {
                Some(policy) => policy.decide(attempt, started.elapsed()),
                None => RetryDecision::GiveUp,
            };

            match decision {
                RetryDecision::Delay(next_delay) => {
                    let details = RetryDetails {
                        attempt,
                        elapsed: started.elapsed(),
                        next_delay,
                    };
                    shielded(
                        "on_refresh_failure",
                        self.hooks.on_refresh_failure(&cause, &details),
                    )
                    .await;
                    tokio::select! {
                        _ = token.cancelled() => return Cycle::Superseded,
                        _ = time::sleep(next_delay) => {}
                    }
                }
                RetryDecision::GiveUp => return Cycle::GaveUp(cause),
            }
        }
    }

    /// Derives the stored value (through `combine` when configured) and
    /// publishes it as `Success`.
    async fn store(&self, token: &CancellationToken, produced: T) -> Cycle<T> {
        let shared = match self.shared.upgrade() {
            Some(shared) => shared,
            None => return Cycle::Superseded,
        };

        let stored = match &self.combine {
            Some(merge) => {
                let previous = shared.slot.read();
                tokio::select! {
                    merged = merge(previous, CachedValue::Success(produced.clone())) => merged,
                    _ = token.cancelled() => return Cycle::Superseded,
                }
            }
            None => produced,
        };

        if shared.publish(self.generation, CachedValue::Success(stored.clone())) {
            Cycle::Published(stored)
        } else {
            Cycle::Superseded
        }
    }

    /// Snapshot of the slot, or `None` if the cell is gone.
    fn snapshot(&self) -> Option<CachedValue<T>> {
        self.shared.upgrade().map(|shared| shared.slot.read())
    }
}
