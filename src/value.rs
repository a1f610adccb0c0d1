//! # Status-tagged value container.
//!
//! [`CachedValue`] is what every reader of a cell observes: the last
//! known value together with its refresh status. A reader never sees
//! "no value" — each variant carries a usable value of type `T`.
//!
//! - [`CachedValue::Success`] the most recent refresh produced this value.
//! - [`CachedValue::Error`] refreshing gave up; the value is the last
//!   successful one and `cause` identifies the failure.
//! - [`CachedValue::Cancelled`] background refreshing was stopped; the
//!   value is whatever was last held.

use crate::error::ProduceError;

/// Last known value of a cell, tagged with its refresh status.
///
/// The cell only ever stores values built by its own refresher,
/// controller, and builder; user code consumes them by matching or
/// through the accessors below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue<T> {
    /// The most recent refresh succeeded and produced this value.
    Success(T),

    /// The retry policy gave up on the most recent refresh.
    Error {
        /// Last successfully produced value (stale but usable).
        value: T,
        /// Why the refresh ultimately failed.
        cause: ProduceError,
    },

    /// Background refreshing is stopped.
    Cancelled(T),
}

impl<T> CachedValue<T> {
    /// Returns the carried value, regardless of status.
    pub fn value(&self) -> &T {
        match self {
            CachedValue::Success(v) => v,
            CachedValue::Error { value, .. } => value,
            CachedValue::Cancelled(v) => v,
        }
    }

    /// Consumes the snapshot and returns the carried value.
    pub fn into_value(self) -> T {
        match self {
            CachedValue::Success(v) => v,
            CachedValue::Error { value, .. } => value,
            CachedValue::Cancelled(v) => v,
        }
    }

    /// Returns the failure cause, if the status is [`CachedValue::Error`].
    pub fn cause(&self) -> Option<&ProduceError> {
        match self {
            CachedValue::Error { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// Transforms the carried value, preserving the status tag and any cause.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CachedValue<U> {
        match self {
            CachedValue::Success(v) => CachedValue::Success(f(v)),
            CachedValue::Error { value, cause } => CachedValue::Error {
                value: f(value),
                cause,
            },
            CachedValue::Cancelled(v) => CachedValue::Cancelled(f(v)),
        }
    }

    /// True if the most recent refresh succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, CachedValue::Success(_))
    }

    /// True if refreshing gave up and the value is stale.
    pub fn is_error(&self) -> bool {
        matches!(self, CachedValue::Error { .. })
    }

    /// True if background refreshing is stopped.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CachedValue::Cancelled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_tag_and_cause() {
        let ok = CachedValue::Success(2).map(|v| v * 10);
        assert_eq!(ok, CachedValue::Success(20));

        let cause = ProduceError::failed("boom");
        let err = CachedValue::Error {
            value: 2,
            cause: cause.clone(),
        }
        .map(|v| v.to_string());
        assert_eq!(
            err,
            CachedValue::Error {
                value: "2".to_string(),
                cause,
            }
        );

        let stopped = CachedValue::Cancelled(7).map(|v| v + 1);
        assert_eq!(stopped, CachedValue::Cancelled(8));
    }

    #[test]
    fn every_variant_carries_a_value() {
        assert_eq!(*CachedValue::Success(1).value(), 1);
        assert_eq!(
            *CachedValue::Error {
                value: 2,
                cause: ProduceError::failed("x"),
            }
            .value(),
            2
        );
        assert_eq!(CachedValue::Cancelled(3).into_value(), 3);
    }

    #[test]
    fn cause_is_only_present_on_error() {
        assert!(CachedValue::Success(0).cause().is_none());
        assert!(CachedValue::Cancelled(0).cause().is_none());
        let err = CachedValue::Error {
            value: 0,
            cause: ProduceError::failed("boom"),
        };
        assert_eq!(err.cause(), Some(&ProduceError::failed("boom")));
    }
}
