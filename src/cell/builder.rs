//! # Cell builder and acquisition.
//!
//! [`CellBuilder`] collects a cell's configuration and acquires it:
//! run the producer once under the caller's await, seed the slot, spawn
//! the refresher, hand back a [`Controller`].
//!
//! ## Acquisition
//! 1. The producer runs synchronously (one awaited call). On failure:
//!    - with a default value → the slot starts as `Success(default)`
//!      and the first real value arrives one cadence later;
//!    - without → acquisition fails with the producer's cause and
//!      nothing is retained.
//! 2. The refresher starts with generation 0.
//!
//! ## Teardown
//! [`CellBuilder::scoped`] guarantees `shutdown` when the scope ends.
//! With [`CellBuilder::start`], teardown is the caller's job; dropping
//! every controller clone still cancels the refresher promptly.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::cell::controller::Controller;
use crate::cell::refresher::Refresher;
use crate::cell::shared::{CellConfig, CombineFn, Shared};
use crate::error::AcquireError;
use crate::hooks::{Hooks, NoopHooks};
use crate::policies::RetryPolicy;
use crate::produce::ProducerRef;
use crate::value::CachedValue;

/// Default per-subscriber updates backlog.
const DEFAULT_BACKLOG: usize = 16;

/// Builder for a self-refreshing cell.
///
/// ## Example
/// ```no_run
/// use std::time::Duration;
/// use freshcell::{CellBuilder, ProduceError, ProduceFn};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn demo() -> Result<(), freshcell::AcquireError> {
/// let producer = ProduceFn::arc(|_ctx: CancellationToken| async {
///     Ok::<_, ProduceError>(42u64)
/// });
///
/// let cell = CellBuilder::new(producer, |_v: &u64| Duration::from_secs(30))
///     .with_default(0)
///     .start()
///     .await?;
///
/// assert_eq!(cell.value(), 42);
/// cell.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct CellBuilder<T> {
    producer: ProducerRef<T>,
    cadence: Arc<dyn Fn(&T) -> Duration + Send + Sync>,
    default_value: Option<T>,
    retry: Option<Arc<dyn RetryPolicy>>,
    hooks: Arc<dyn Hooks<T>>,
    combine: Option<CombineFn<T>>,
    backlog: usize,
}

impl<T: Clone + Send + Sync + 'static> CellBuilder<T> {
    /// Creates a builder from the two required pieces: the producer and
    /// the cadence function.
    ///
    /// The cadence is computed from each value just stored, so the
    /// refresh interval can depend on content (a token's expiry, say).
    pub fn new(
        producer: ProducerRef<T>,
        cadence: impl Fn(&T) -> Duration + Send + Sync + 'static,
    ) -> Self {
        Self {
            producer,
            cadence: Arc::new(cadence),
            default_value: None,
            retry: None,
            hooks: Arc::new(NoopHooks),
            combine: None,
            backlog: DEFAULT_BACKLOG,
        }
    }

    /// Value used if the initial production fails.
    ///
    /// Without one, a failed initial production fails acquisition.
    pub fn with_default(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Retry policy for failed refreshes.
    ///
    /// Absent, the first failure of a refresh cycle gives up
    /// immediately.
    pub fn with_retry<P: RetryPolicy>(mut self, policy: P) -> Self {
        self.retry = Some(Arc::new(policy));
        self
    }

    /// Lifecycle hooks (new value / retried failure / exhaustion).
    pub fn with_hooks<H: Hooks<T>>(mut self, hooks: H) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Merge function applied on each successful production.
    ///
    /// Receives the previous snapshot and the new production (as
    /// `Success`) and derives the value actually stored. Applied only on
    /// success; failures never reach it.
    pub fn with_combine<F, Fut>(mut self, combine: F) -> Self
    where
        F: Fn(CachedValue<T>, CachedValue<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        self.combine = Some(Arc::new(move |previous, fresh| {
            let merged: BoxFuture<'static, T> = Box::pin(combine(previous, fresh));
            merged
        }));
        self
    }

    /// Per-subscriber updates backlog (clamped to at least 1,
    /// default 16).
    ///
    /// A subscriber lagging more than this many writes drops its oldest
    /// buffered values; see [`Updates::missed`](crate::Updates::missed).
    pub fn with_backlog(mut self, backlog: usize) -> Self {
        self.backlog = backlog.max(1);
        self
    }

    /// Acquires the cell: initial production, slot seeding, refresher
    /// spawn.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(self) -> Result<Controller<T>, AcquireError> {
        let initial = match self.producer.produce(CancellationToken::new()).await {
            Ok(value) => value,
            Err(cause) => match self.default_value {
                Some(default) => default,
                None => return Err(AcquireError::InitialProduce { source: cause }),
            },
        };

        let config = CellConfig {
            producer: self.producer,
            cadence: self.cadence,
            retry: self.retry,
            hooks: self.hooks,
            combine: self.combine,
        };
        let (shared, generation, token) =
            Shared::new(CachedValue::Success(initial), self.backlog, config);

        let refresher = Refresher::new(&shared, generation);
        shared.store_task(tokio::spawn(refresher.run(token)));

        Ok(Controller::new(shared))
    }

    /// Acquires the cell, runs `scope` with a controller, and always
    /// shuts the refresher down before returning.
    ///
    /// The slot is left in its last pre-exit state: `Cancelled` if the
    /// scope explicitly cancelled, otherwise whatever the final refresh
    /// left.
    pub async fn scoped<F, Fut, Out>(self, scope: F) -> Result<Out, AcquireError>
    where
        F: FnOnce(Controller<T>) -> Fut,
        Fut: Future<Output = Out>,
    {
        let controller = self.start().await?;
        let out = scope(controller.clone()).await;
        controller.shutdown().await;
        Ok(out)
    }
}
