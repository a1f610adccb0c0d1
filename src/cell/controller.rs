//! # Controller: the user-facing cell handle.
//!
//! A [`Controller`] reads the current value, subscribes to updates, and
//! owns the cancel/restart authority over the background refresher.
//! Handles are cheap to clone; all clones observe and control the same
//! cell.
//!
//! ## Rules
//! - `get` / `value` / `status` / `cancel` / `restart` never suspend;
//!   only [`Controller::shutdown`] awaits the refresher task.
//! - `cancel` and `restart` are single-winner under races: exactly one
//!   concurrent caller observes `true`.
//! - `cancel` / `restart` never fail; impossible transitions report
//!   `false`.
//! - Dropping every handle cancels the refresher token as a safety net,
//!   but deterministic teardown is [`Controller::shutdown`] (which
//!   [`CellBuilder::scoped`](crate::CellBuilder::scoped) calls for you).

use std::sync::Arc;

use crate::cell::lifecycle::CellStatus;
use crate::cell::refresher::Refresher;
use crate::cell::shared::Shared;
use crate::updates::Updates;
use crate::value::CachedValue;

/// Handle for reading, observing, and controlling one cell.
pub struct Controller<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Controller<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Controller<T> {
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        Self { shared }
    }

    /// Returns a snapshot of the current value and its refresh status.
    pub fn get(&self) -> CachedValue<T> {
        self.shared.slot.read()
    }

    /// Returns the current value, ignoring its status.
    pub fn value(&self) -> T {
        self.get().into_value()
    }

    /// Returns the refresher's lifecycle status.
    pub fn status(&self) -> CellStatus {
        self.shared.status()
    }

    /// True while a refresher instance is running.
    pub fn is_active(&self) -> bool {
        self.status() == CellStatus::Active
    }

    /// Stops background refreshing and marks the value `Cancelled`.
    ///
    /// An in-flight producer call or sleep is interrupted promptly. The
    /// `Cancelled` snapshot is visible to `get` before this returns.
    ///
    /// Returns `true` iff this call performed the transition; duplicate
    /// or racing calls, and calls on an exhausted cell, return `false`.
    pub fn cancel(&self) -> bool {
        self.shared.cancel()
    }

    /// Resumes refreshing after a cancel or exhaustion.
    ///
    /// Spawns a fresh refresher seeded with the slot's current value;
    /// the first new production happens one cadence later. Returns
    /// `true` iff the cell was in a terminal state and this call
    /// performed the transition; an active cell returns `false`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn restart(&self) -> bool {
        let Some((generation, token)) = self.shared.begin_restart() else {
            return false;
        };
        let refresher = Refresher::new(&self.shared, generation);
        self.shared.store_task(tokio::spawn(refresher.run(token)));
        true
    }

    /// Stops the refresher and waits for its task to terminate.
    ///
    /// Unlike [`Controller::cancel`], the slot is left in its last
    /// pre-shutdown state: `Cancelled` only if the caller explicitly
    /// cancelled, otherwise whatever the final refresh left. Idempotent.
    pub async fn shutdown(&self) {
        self.shared.stop();
        if let Some(task) = self.shared.take_task() {
            let _ = task.await;
        }
    }
}

impl<T: Clone + Send + Sync + 'static + Unpin> Controller<T> {
    /// Subscribes to every status change from now on.
    ///
    /// The stream starts with the value currently held, then yields
    /// every subsequent write in write order. See
    /// [`Updates`] for the backlog bound and lag reporting.
    pub fn updates(&self) -> Updates<T> {
        let (snapshot, rx) = self.shared.slot.subscribe();
        Updates::new(snapshot, rx)
    }
}
