//! Shared DTOs for the repairkit workspace.
//!
//! # Design constraints
//! - Items are owned by the host; these types only describe them.
//! - Everything here round-trips through serde so hosts and the CLI can exchange inventories as JSON.
//! - Prefer adding optional fields over changing semantics.

pub mod actor;
pub mod cooldown;
pub mod item;
pub mod tag;

pub use actor::ActorId;
pub use cooldown::CooldownTrack;
pub use item::{CategoryId, Item, ItemClass, ItemMeta};
pub use tag::TagValue;

/// Permission names queried through the permission port.
pub mod permissions {
    pub const BYPASS_COOLDOWN: &str = "repairkit.bypass.cooldown";
    pub const BYPASS_COST: &str = "repairkit.bypass.cost";
}

/// Persistent tag keys written onto items.
pub mod tag_keys {
    pub const EXCLUDE: &str = "repairkit:exclude";
}
