//! # Single-cell value holder with change broadcast.
//!
//! [`Slot`] owns the current [`CachedValue`] and a
//! [`tokio::sync::broadcast`] channel that carries every write to
//! subscribers. Writes are serialized by the cell's lifecycle lock; the
//! slot itself only guards snapshot consistency.

use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::value::CachedValue;

/// Current value of a cell plus its change signal.
pub(crate) struct Slot<T> {
    current: RwLock<CachedValue<T>>,
    tx: broadcast::Sender<CachedValue<T>>,
}

impl<T: Clone> Slot<T> {
    /// Creates a slot holding `initial`, with a per-subscriber backlog
    /// of `backlog` writes (clamped to at least 1).
    pub(crate) fn new(initial: CachedValue<T>, backlog: usize) -> Self {
        let (tx, _rx) = broadcast::channel(backlog.max(1));
        Self {
            current: RwLock::new(initial),
            tx,
        }
    }

    /// Returns a snapshot of the current value.
    pub(crate) fn read(&self) -> CachedValue<T> {
        self.current.read().clone()
    }

    /// Replaces the current value and publishes it to subscribers.
    ///
    /// Must only be called while holding the cell's lifecycle lock, so
    /// that writes are totally ordered. Publishing with no subscribers
    /// is fine; the write is still observable through [`Slot::read`].
    pub(crate) fn write(&self, value: CachedValue<T>) {
        let mut current = self.current.write();
        *current = value.clone();
        let _ = self.tx.send(value);
    }

    /// Atomically captures the current value and a receiver for all
    /// subsequent writes.
    ///
    /// Holding the read lock while subscribing means no write can slip
    /// between the snapshot and the subscription.
    pub(crate) fn subscribe(
        &self,
    ) -> (CachedValue<T>, broadcast::Receiver<CachedValue<T>>) {
        let current = self.current.read();
        (current.clone(), self.tx.subscribe())
    }
}
