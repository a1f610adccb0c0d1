//! # Error types used by the cell and by producers.
//!
//! This module defines two error enums:
//!
//! - [`ProduceError`] failures raised by a producer call. These are the
//!   "causes" carried inside [`CachedValue::Error`](crate::CachedValue)
//!   and handed to the failure hooks.
//! - [`AcquireError`] failure of the initial synchronous production
//!   during [`CellBuilder::start`](crate::CellBuilder::start).
//!
//! Both types provide an `as_label` helper for logs.

use thiserror::Error;

/// # Failure of a single producer call.
///
/// Producers map their own errors into this type, the same way a task
/// maps its errors into a runtime's task error. The enum is `Clone` and
/// `PartialEq` so a cause can live inside a
/// [`CachedValue`](crate::CachedValue) snapshot and be compared in
/// assertions.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProduceError {
    /// The producer ran and failed.
    #[error("produce failed: {reason}")]
    Failed {
        /// Human-readable failure description.
        reason: String,
    },

    /// The producer observed cancellation and bailed out.
    ///
    /// Producers are not required to return this: the refresher also
    /// abandons in-flight calls when its token is cancelled.
    #[error("produce canceled")]
    Canceled,
}

impl ProduceError {
    /// Shorthand for [`ProduceError::Failed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        ProduceError::Failed {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ProduceError::Failed { .. } => "produce_failed",
            ProduceError::Canceled => "produce_canceled",
        }
    }

    /// Whether this cause is a cooperative cancellation, not a real failure.
    pub fn is_canceled(&self) -> bool {
        matches!(self, ProduceError::Canceled)
    }
}

/// # Failure to acquire a cell.
///
/// Surfaced only by [`CellBuilder::start`](crate::CellBuilder::start) /
/// [`CellBuilder::scoped`](crate::CellBuilder::scoped): once a cell is
/// running, producer failures flow through the slot instead.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AcquireError {
    /// The first producer call failed and no default value was configured.
    #[error("initial production failed: {source}")]
    InitialProduce {
        /// The producer's failure cause.
        #[source]
        source: ProduceError,
    },
}

impl AcquireError {
    /// Returns a short stable label.
    pub fn as_label(&self) -> &'static str {
        match self {
            AcquireError::InitialProduce { .. } => "acquire_initial_produce",
        }
    }
}
