//! # Single-winner lifecycle cell.
//!
//! The refresher's lifecycle is one state cell holding
//! `Active / Cancelled / Exhausted`. Every transition and every slot
//! write happens under the same lock, which is what makes cancel and
//! restart races resolve to exactly one winner and guarantees that a
//! terminated refresher never writes again.

use tokio_util::sync::CancellationToken;

/// Lifecycle state of a cell's refresher.
pub(crate) enum Lifecycle {
    /// A refresher instance is running (or about to run).
    Active {
        /// Instance number; a superseded refresher's writes are refused
        /// by comparing against this.
        generation: u64,
        /// Token cancelling this instance's sleeps and producer calls.
        token: CancellationToken,
    },
    /// Refreshing stopped by an explicit cancel (or scope teardown).
    Cancelled,
    /// Refreshing stopped because the retry policy gave up.
    Exhausted,
}

impl Lifecycle {
    /// True if the state is terminal (only `restart` can leave it).
    pub(crate) fn is_terminal(&self) -> bool {
        matches!(self, Lifecycle::Cancelled | Lifecycle::Exhausted)
    }
}

/// Externally observable lifecycle status of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    /// A refresher is running; the value is being kept fresh.
    Active,
    /// Refreshing was cancelled. `restart` can resume it.
    Cancelled,
    /// The retry policy gave up. `restart` can resume refreshing.
    Exhausted,
}

impl From<&Lifecycle> for CellStatus {
    fn from(state: &Lifecycle) -> Self {
        match state {
            Lifecycle::Active { .. } => CellStatus::Active,
            Lifecycle::Cancelled => CellStatus::Cancelled,
            Lifecycle::Exhausted => CellStatus::Exhausted,
        }
    }
}
