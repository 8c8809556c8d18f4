//! Embeddable runtime for repairkit.
//!
//! Wires a [`RepairEngine`] to host collaborators. Hosts with their own inventory, permission
//! or economy systems implement the traits in [`repairkit_domain::ports`]; everything else can
//! use the in-memory adapters here.
//!
//! # Adapters
//!
//! - [`SystemClock`] / [`ManualClock`]: wall clock and a test clock
//! - [`PermissionSet`]: explicit per-actor grants
//! - [`ItemTagStore`]: tags stored on the item itself
//! - [`SlotInventory`]: per-actor slots with a selected hand slot
//! - [`Ledger`]: balances with insufficient-funds checks
//! - [`DeferredScheduler`] / [`NoopScheduler`]: tick-driven and discarding schedulers
//! - [`TracingFeedback`] / [`RecordingFeedback`]: feedback via logs or captured for tests
//!
//! # Entry point
//!
//! [`EngineBuilder`] fills every port not supplied explicitly with a default adapter.

pub mod adapters;
pub mod builder;

pub use adapters::{
    ActorSlots, DeferredScheduler, ItemTagStore, Ledger, LedgerError, ManualClock,
    NoopScheduler, PermissionSet, RecordingFeedback, SlotInventory, SystemClock,
    TracingFeedback,
};
pub use builder::EngineBuilder;

// Re-export the engine so embedders don't need repairkit-domain directly.
pub use repairkit_domain::{RepairEngine, RepairError, RepairResult};
