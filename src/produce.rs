//! # Producer abstraction.
//!
//! Defines the [`Produce`] trait: the user-supplied, re-runnable source
//! of fresh values.
//!
//! - **[`Produce`]** — trait for async, cancelable value production
//! - **[`ProducerRef`]** — shared handle (`Arc<dyn Produce<T>>`)
//! - **[`ProduceFn`]** — closure-backed implementation
//! - **[`BoxProduceFuture`]** — type alias for boxed produce futures
//!
//! ## Rules
//! - `produce(&self, ..)` is called many times over the life of a cell:
//!   once synchronously at acquisition and once per refresh attempt.
//!   Each call must return a fresh, independent future.
//! - The [`CancellationToken`] handed to a call is cancelled when the
//!   cell is cancelled or restarted mid-attempt. Checking it is
//!   optional — the refresher also abandons the in-flight future — but
//!   lets long-running producers stop early.

use std::{future::Future, pin::Pin, sync::Arc};

use tokio_util::sync::CancellationToken;

use crate::error::ProduceError;

/// Boxed future returned by [`Produce::produce`].
pub type BoxProduceFuture<T> =
    Pin<Box<dyn Future<Output = Result<T, ProduceError>> + Send + 'static>>;

/// Shared handle to a producer object.
pub type ProducerRef<T> = Arc<dyn Produce<T>>;

/// Asynchronous, re-runnable source of values of type `T`.
///
/// ## Example
///
/// ```rust
/// use freshcell::{BoxProduceFuture, Produce};
/// use tokio_util::sync::CancellationToken;
///
/// struct Sequence;
///
/// impl Produce<u64> for Sequence {
///     fn produce(&self, _ctx: CancellationToken) -> BoxProduceFuture<u64> {
///         Box::pin(async { Ok(42) })
///     }
/// }
/// ```
pub trait Produce<T>: Send + Sync + 'static {
    /// Creates a new future that yields one value or fails with a cause.
    ///
    /// Takes `&self`, not `&mut self`: calls may overlap a restart, and
    /// each returned future owns its own state.
    fn produce(&self, ctx: CancellationToken) -> BoxProduceFuture<T>;
}

/// Closure-backed producer.
///
/// Wraps `F: Fn(CancellationToken) -> Fut`, producing a fresh future per
/// call.
///
/// ## Example
/// ```rust
/// use freshcell::{ProduceFn, ProducerRef, ProduceError};
/// use tokio_util::sync::CancellationToken;
///
/// let p: ProducerRef<u32> = ProduceFn::arc(|_ctx: CancellationToken| async {
///     Ok::<_, ProduceError>(7)
/// });
/// ```
pub struct ProduceFn<F> {
    f: F,
}

impl<F> ProduceFn<F> {
    /// Creates a new closure-backed producer.
    ///
    /// Prefer [`ProduceFn::arc`] when you immediately need a [`ProducerRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the producer and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

impl<F, Fut, T> Produce<T> for ProduceFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ProduceError>> + Send + 'static,
    T: 'static,
{
    fn produce(&self, ctx: CancellationToken) -> BoxProduceFuture<T> {
        Box::pin((self.f)(ctx))
    }
}
