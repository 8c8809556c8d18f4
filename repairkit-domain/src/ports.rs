//! Port traits abstracting every host collaborator away from the engine.

use repairkit_types::{ActorId, CooldownTrack, Item, TagValue};
use std::time::Duration;

/// Persistent per-item tags (NBT-style key/value storage).
pub trait TagStore: Send + Sync {
    fn contains(&self, item: &Item, key: &str) -> bool;

    fn set(&self, item: Item, key: &str, value: TagValue) -> Item;

    fn delete(&self, item: Item, key: &str) -> Item;
}

/// Permission checks for an actor.
pub trait PermissionOracle: Send + Sync {
    fn has_permission(&self, actor: &ActorId, permission: &str) -> bool;
}

/// The actor's inventory, owned by the host.
///
/// Implementations yield non-empty slots only, in a deterministic order for a fixed
/// inventory state.
pub trait InventorySource {
    fn items(&self, actor: &ActorId) -> Vec<&Item>;

    fn items_mut(&mut self, actor: &ActorId) -> Vec<&mut Item>;

    fn hand(&self, actor: &ActorId) -> Option<&Item>;

    fn hand_mut(&mut self, actor: &ActorId) -> Option<&mut Item>;
}

/// Currency withdrawal. Insufficient funds and similar failures are the sink's business.
pub trait CurrencySink: Send + Sync {
    fn withdraw(&self, actor: &ActorId, amount: f64) -> anyhow::Result<()>;
}

/// Audio/visual cue played after a repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackCue {
    pub track: CooldownTrack,
    pub sound: String,
}

/// Fire-and-forget feedback.
pub trait FeedbackSink: Send + Sync {
    fn play(&self, actor: &ActorId, cue: &FeedbackCue);
}

/// A deferred task handed to the host scheduler.
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Delayed execution on the host's control thread.
pub trait Scheduler: Send + Sync {
    fn run_after(&self, delay: Duration, task: ScheduledTask);
}

/// Wall clock in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}
