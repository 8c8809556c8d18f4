//! Default in-memory port implementations.

mod clock;
mod currency;
mod feedback;
mod inventory;
mod permissions;
mod scheduler;
mod tags;

pub use clock::{ManualClock, SystemClock};
pub use currency::{Ledger, LedgerError};
pub use feedback::{RecordingFeedback, TracingFeedback};
pub use inventory::{ActorSlots, SlotInventory};
pub use permissions::PermissionSet;
pub use scheduler::{DeferredScheduler, NoopScheduler};
pub use tags::ItemTagStore;
