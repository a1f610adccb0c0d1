//! # freshcell
//!
//! **Freshcell** is a single-slot, self-refreshing cache.
//!
//! It holds exactly one value, keeps it fresh by re-running a
//! caller-supplied producer on a per-value cadence, and lets readers
//! observe the latest value along with its refresh status. Readers who
//! prefer stale-but-available data over unavailability always get a
//! value; the status tag tells them whether it is fresh, known-failing,
//! or definitively stopped.
//!
//! ## Features
//!
//! | Area             | Description                                                    | Key types / traits                       |
//! |------------------|----------------------------------------------------------------|------------------------------------------|
//! | **Value**        | Status-tagged container readers observe.                       | [`CachedValue`]                          |
//! | **Production**   | User-supplied, re-runnable, cancelable value source.           | [`Produce`], [`ProduceFn`]               |
//! | **Policies**     | Decide retry delays and when to give up.                       | [`RetryPolicy`], [`BackoffPolicy`], [`Limited`] |
//! | **Control**      | Read, cancel, restart, observe one cell.                       | [`Controller`]                           |
//! | **Updates**      | Stream of every status change since subscription.              | [`Updates`]                              |
//! | **Hooks**        | Observe new values, retried failures, exhaustion.              | [`Hooks`]                                |
//! | **Errors**       | Producer causes and acquisition failure.                       | [`ProduceError`], [`AcquireError`]       |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogHooks`] _(demo/reference only)_.
//!
//! ```no_run
//! use std::time::Duration;
//! use freshcell::{CellBuilder, ConstantDelay, Limited, ProduceError, ProduceFn};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // A producer is any re-runnable async computation.
//!     let producer = ProduceFn::arc(|_ctx: CancellationToken| async {
//!         // fetch a token, read a config file, query a registry...
//!         Ok::<_, ProduceError>(String::from("fresh"))
//!     });
//!
//!     let cell = CellBuilder::new(producer, |_v: &String| Duration::from_secs(30))
//!         .with_retry(Limited::new(ConstantDelay::new(Duration::from_secs(1)), 3))
//!         .start()
//!         .await?;
//!
//!     // Non-blocking snapshot; never empty.
//!     println!("current: {:?}", cell.get());
//!
//!     // Deterministic teardown.
//!     cell.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ---

mod cell;
mod error;
mod hooks;
mod policies;
mod produce;
mod updates;
mod value;

// ---- Public re-exports ----

pub use cell::{CellBuilder, CellStatus, Controller};
pub use error::{AcquireError, ProduceError};
pub use hooks::{Hooks, NoopHooks};
pub use policies::{
    BackoffPolicy, ConstantDelay, JitterPolicy, Limited, RetryDecision, RetryDetails, RetryPolicy,
};
pub use produce::{BoxProduceFuture, Produce, ProduceFn, ProducerRef};
pub use updates::Updates;
pub use value::CachedValue;

// Optional: expose simple println-based hooks (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use hooks::LogHooks;
