//! # The cell engine.
//!
//! Wires the slot, the lifecycle cell, the refresher loop, and the
//! user-facing controller and builder together.
//!
//! ```text
//! CellBuilder::start()
//!     │ initial production (caller's await)
//!     ├──► Slot seeded with Success(initial)
//!     └──► spawn Refresher (generation 0)
//!               │ cadence wait → produce → publish
//!               └──► Slot write ──► Updates subscribers
//!
//! Controller ── cancel/restart ──► Lifecycle (single-winner)
//!            ── get/updates ─────► Slot
//! ```

mod builder;
mod controller;
mod lifecycle;
mod refresher;
mod shared;
mod slot;

pub use builder::CellBuilder;
pub use controller::Controller;
pub use lifecycle::CellStatus;
