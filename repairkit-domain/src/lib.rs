//! Domain logic: decide whether an item can be repaired, what it costs, and whether a cooldown
//! blocks the actor.
//!
//! This crate owns *what* the rules are. Inventories, permissions, currency, feedback and
//! scheduling belong to the host and are reached through the traits in [`ports`]; default
//! implementations live in `repairkit-core`.

mod cooldown;
mod eligibility;
mod engine;
mod error;
mod exclusion;
mod matcher;
pub mod ports;

pub use cooldown::CooldownBook;
pub use eligibility::is_potentially_repairable;
pub use engine::{EnginePorts, MatchedException, RepairEngine};
pub use error::{RepairError, RepairResult};
pub use exclusion::{add_exclusion_tag, has_exclusion_tag, remove_exclusion_tag};
pub use matcher::{Mismatch, first_match, is_based_on, mismatch};
