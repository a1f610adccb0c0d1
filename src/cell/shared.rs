//! # Shared cell state.
//!
//! [`Shared`] is the state owned jointly by controllers (readers,
//! lifecycle authority) and observed by refresher instances through a
//! weak reference. It couples the slot with the lifecycle cell and
//! funnels every slot write through the lifecycle lock.
//!
//! ## Rules
//! - A refresher write names its generation; writes from superseded
//!   instances are refused.
//! - `cancel` / `exhaust` / `restart` are single-winner transitions:
//!   the returned flag is true for exactly one caller under any race.
//! - Dropping the last [`Shared`] handle cancels the active token so an
//!   orphaned refresher stops promptly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::cell::lifecycle::{CellStatus, Lifecycle};
use crate::cell::slot::Slot;
use crate::error::ProduceError;
use crate::hooks::Hooks;
use crate::policies::RetryPolicy;
use crate::produce::ProducerRef;
use crate::value::CachedValue;

/// Cadence function: value just stored → wait before the next refresh.
pub(crate) type CadenceFn<T> = dyn Fn(&T) -> Duration + Send + Sync;

/// Combine function: (previous snapshot, new production) → stored value.
pub(crate) type CombineFn<T> =
    Arc<dyn Fn(CachedValue<T>, CachedValue<T>) -> BoxFuture<'static, T> + Send + Sync>;

/// Immutable configuration of a cell, shared by all refresher
/// instances across restarts.
pub(crate) struct CellConfig<T> {
    pub(crate) producer: ProducerRef<T>,
    pub(crate) cadence: Arc<CadenceFn<T>>,
    pub(crate) retry: Option<Arc<dyn RetryPolicy>>,
    pub(crate) hooks: Arc<dyn Hooks<T>>,
    pub(crate) combine: Option<CombineFn<T>>,
}

/// State shared between controllers and refresher instances.
pub(crate) struct Shared<T> {
    pub(crate) slot: Slot<T>,
    pub(crate) config: CellConfig<T>,
    state: Mutex<Lifecycle>,
    generations: AtomicU64,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Clone + Send + Sync + 'static> Shared<T> {
    /// Creates shared state in the `Active` lifecycle, generation 0.
    ///
    /// Returns the state together with the first instance's identity;
    /// the caller spawns the refresher and stores its handle.
    pub(crate) fn new(
        initial: CachedValue<T>,
        backlog: usize,
        config: CellConfig<T>,
    ) -> (Arc<Self>, u64, CancellationToken) {
        let token = CancellationToken::new();
        let shared = Arc::new(Self {
            slot: Slot::new(initial, backlog),
            config,
            state: Mutex::new(Lifecycle::Active {
                generation: 0,
                token: token.clone(),
            }),
            generations: AtomicU64::new(0),
            task: Mutex::new(None),
        });
        (shared, 0, token)
    }

    /// Publishes a refresher's successful value.
    ///
    /// Refused (returning `false`) if the cell left the `Active` state
    /// or the writing instance was superseded by a restart.
    pub(crate) fn publish(&self, generation: u64, value: CachedValue<T>) -> bool {
        let state = self.state.lock();
        match &*state {
            Lifecycle::Active { generation: g, .. } if *g == generation => {
                self.slot.write(value);
                true
            }
            _ => false,
        }
    }

    /// Transitions a refresher to `Exhausted`, writing
    /// `Error(last_value, cause)` into the slot.
    ///
    /// Returns `false` if a cancel or restart won the race first; the
    /// caller must then skip its exhaustion hook.
    pub(crate) fn exhaust(&self, generation: u64, cause: ProduceError) -> bool {
        let mut state = self.state.lock();
        match &*state {
            Lifecycle::Active { generation: g, .. } if *g == generation => {
                let last = self.slot.read().into_value();
                self.slot.write(CachedValue::Error { value: last, cause });
                *state = Lifecycle::Exhausted;
                true
            }
            _ => false,
        }
    }

    /// Cancels the active refresher and marks the value `Cancelled`.
    ///
    /// Single-winner: `true` for the call that performed the
    /// transition, `false` for duplicates and for terminal states.
    pub(crate) fn cancel(&self) -> bool {
        let mut state = self.state.lock();
        match &*state {
            Lifecycle::Active { token, .. } => {
                token.cancel();
                let last = self.slot.read().into_value();
                self.slot.write(CachedValue::Cancelled(last));
                *state = Lifecycle::Cancelled;
                true
            }
            _ => false,
        }
    }

    /// Stops the active refresher without touching the slot.
    ///
    /// Used by scope teardown: the slot keeps whatever the final
    /// refresh left; only an explicit cancel marks the value
    /// `Cancelled`.
    pub(crate) fn stop(&self) {
        let mut state = self.state.lock();
        if let Lifecycle::Active { token, .. } = &*state {
            token.cancel();
            *state = Lifecycle::Cancelled;
        }
    }

    /// Claims a restart: terminal → `Active` with a fresh generation.
    ///
    /// Returns the new instance's identity for the caller to spawn, or
    /// `None` if the cell is still active (or another restart won).
    pub(crate) fn begin_restart(&self) -> Option<(u64, CancellationToken)> {
        let mut state = self.state.lock();
        if !state.is_terminal() {
            return None;
        }
        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        let token = CancellationToken::new();
        *state = Lifecycle::Active {
            generation,
            token: token.clone(),
        };
        Some((generation, token))
    }

    /// Current lifecycle status.
    pub(crate) fn status(&self) -> CellStatus {
        CellStatus::from(&*self.state.lock())
    }

    /// Stores the handle of a freshly spawned refresher task.
    ///
    /// A previous handle is dropped, not awaited: its instance has
    /// either exited or holds a cancelled token and exits promptly.
    pub(crate) fn store_task(&self, handle: JoinHandle<()>) {
        *self.task.lock() = Some(handle);
    }

    /// Takes the current refresher task handle for awaiting.
    pub(crate) fn take_task(&self) -> Option<JoinHandle<()>> {
        self.task.lock().take()
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        if let Lifecycle::Active { token, .. } = &*self.state.lock() {
            token.cancel();
        }
    }
}
