//! The repair decision engine.
//!
//! Holds the live configuration snapshot and cooldown book, and answers every eligibility,
//! cost and cooldown question against one snapshot per call.

use crate::cooldown::CooldownBook;
use crate::eligibility::is_potentially_repairable;
use crate::error::{RepairError, RepairResult};
use crate::exclusion;
use crate::matcher::first_match;
use crate::ports::{
    Clock, CurrencySink, FeedbackCue, FeedbackSink, InventorySource, PermissionOracle, Scheduler,
    TagStore,
};
use repairkit_config::{CategoryRegistry, ConfigError, ConfigSnapshot, RawConfig};
use repairkit_types::{ActorId, CooldownTrack, Item, permissions};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, info};

/// Host collaborators the engine calls through.
#[derive(Clone)]
pub struct EnginePorts {
    pub permissions: Arc<dyn PermissionOracle>,
    pub tags: Arc<dyn TagStore>,
    pub clock: Arc<dyn Clock>,
    pub scheduler: Arc<dyn Scheduler>,
    pub feedback: Arc<dyn FeedbackSink>,
    /// Required only when the snapshot enables economy integration.
    pub currency: Option<Arc<dyn CurrencySink>>,
}

/// The cost exception an item resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedException {
    /// Position in load order.
    pub index: usize,
    pub label: String,
    pub cost: f64,
}

pub struct RepairEngine {
    snapshot: RwLock<Arc<ConfigSnapshot>>,
    cooldowns: Arc<Mutex<CooldownBook>>,
    ports: EnginePorts,
}

impl RepairEngine {
    pub fn new(snapshot: ConfigSnapshot, ports: EnginePorts) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            cooldowns: Arc::new(Mutex::new(CooldownBook::default())),
            ports,
        }
    }

    /// The snapshot currently in effect.
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in an already validated snapshot.
    pub fn install(&self, snapshot: ConfigSnapshot) {
        info!(
            cost_exceptions = snapshot.cost_exceptions.len(),
            excluded_categories = snapshot.exclusions.len(),
            economy = snapshot.economy_enabled,
            "installing repair configuration"
        );
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(snapshot);
    }

    /// Validate `raw` and install it. On error the previous snapshot stays live.
    pub fn reload(
        &self,
        raw: &RawConfig,
        registry: &dyn CategoryRegistry,
    ) -> Result<(), ConfigError> {
        let snapshot = ConfigSnapshot::load(raw, registry)?;
        self.install(snapshot);
        Ok(())
    }

    pub fn is_potentially_repairable(&self, item: &Item) -> bool {
        is_potentially_repairable(item)
    }

    pub fn is_repairable(&self, item: &Item) -> bool {
        self.repairable(&self.snapshot(), item)
    }

    pub fn has_exclusion_tag(&self, item: &Item) -> bool {
        exclusion::has_exclusion_tag(
            self.ports.tags.as_ref(),
            &self.snapshot().exclusions,
            item,
        )
    }

    pub fn add_exclusion_tag(&self, item: Item) -> Item {
        exclusion::add_exclusion_tag(self.ports.tags.as_ref(), item)
    }

    pub fn remove_exclusion_tag(&self, item: Item) -> Item {
        exclusion::remove_exclusion_tag(self.ports.tags.as_ref(), item)
    }

    /// Does the actor hold at least one item that could be repaired right now?
    pub fn has_any_repairable(&self, actor: &ActorId, inventory: &dyn InventorySource) -> bool {
        let snapshot = self.snapshot();
        inventory
            .items(actor)
            .into_iter()
            .any(|item| self.repairable(&snapshot, item))
    }

    pub fn is_bypassing_cost(&self, actor: &ActorId) -> bool {
        self.ports
            .permissions
            .has_permission(actor, permissions::BYPASS_COST)
    }

    pub fn is_bypassing_cooldown(&self, actor: &ActorId) -> bool {
        self.ports
            .permissions
            .has_permission(actor, permissions::BYPASS_COOLDOWN)
    }

    /// Configured duration for `track`, or zero for actors who bypass cooldowns.
    pub fn cooldown_duration(&self, actor: &ActorId, track: CooldownTrack) -> Duration {
        if self.is_bypassing_cooldown(actor) {
            return Duration::ZERO;
        }
        self.snapshot().cooldown(track)
    }

    pub fn hand_cooldown(&self, actor: &ActorId) -> Duration {
        self.cooldown_duration(actor, CooldownTrack::Hand)
    }

    pub fn all_cooldown(&self, actor: &ActorId) -> Duration {
        self.cooldown_duration(actor, CooldownTrack::All)
    }

    /// Milliseconds until `actor` may use `track` again.
    ///
    /// Actors holding the cooldown bypass have all their stored records erased, not merely
    /// ignored.
    pub fn remaining_cooldown_ms(&self, actor: &ActorId, track: CooldownTrack) -> u64 {
        let mut book = lock_book(&self.cooldowns);

        if self.is_bypassing_cooldown(actor) {
            let cleared = book.clear_actor(actor);
            if cleared > 0 {
                debug!(actor = %actor, cleared, "cooldown bypass cleared records");
            }
            return 0;
        }

        book.remaining_ms(actor, track, self.ports.clock.now_ms())
    }

    pub fn calculate_item_cost(&self, actor: &ActorId, item: &Item) -> f64 {
        self.item_cost(&self.snapshot(), actor, item)
    }

    /// Which cost exception, if any, the item's normalized copy is based on.
    pub fn matching_exception(&self, item: &Item) -> Option<MatchedException> {
        let snapshot = self.snapshot();
        first_match(&snapshot.cost_exceptions, item).map(|(index, exception)| MatchedException {
            index,
            label: exception.label.clone(),
            cost: exception.cost,
        })
    }

    pub fn calculate_inventory_cost(&self, actor: &ActorId, inventory: &dyn InventorySource) -> f64 {
        self.inventory_cost(&self.snapshot(), actor, inventory)
    }

    /// Repair the item in the actor's hand.
    ///
    /// Eligibility and cooldown are not re-checked; callers must have done so.
    pub fn repair_hand(
        &self,
        actor: &ActorId,
        inventory: &mut dyn InventorySource,
    ) -> RepairResult<()> {
        let snapshot = self.snapshot();
        let currency = self.currency_for(&snapshot)?;

        let cost = inventory
            .hand(actor)
            .map(|item| self.item_cost(&snapshot, actor, item))
            .unwrap_or(0.0);

        if let Some(currency) = currency {
            currency.withdraw(actor, cost)?;
        }

        self.start_cooldown(&snapshot, actor, CooldownTrack::Hand);

        if let Some(item) = inventory.hand_mut(actor) {
            debug!(actor = %actor, category = %item.category, damage = item.damage, cost, "repairing hand item");
            item.damage = 0;
        }

        self.play(&snapshot, actor, CooldownTrack::Hand);
        Ok(())
    }

    /// Repair every repairable item the actor holds.
    ///
    /// Returns true when a damaged item was skipped because it is excluded.
    pub fn repair_all(
        &self,
        actor: &ActorId,
        inventory: &mut dyn InventorySource,
    ) -> RepairResult<bool> {
        let snapshot = self.snapshot();
        let currency = self.currency_for(&snapshot)?;

        let cost = self.inventory_cost(&snapshot, actor, inventory);

        if let Some(currency) = currency {
            currency.withdraw(actor, cost)?;
        }

        self.start_cooldown(&snapshot, actor, CooldownTrack::All);

        let tags = self.ports.tags.as_ref();
        let mut repaired = 0usize;
        let mut skipped_excluded = false;
        for item in inventory.items_mut(actor) {
            if self.repairable(&snapshot, item) {
                item.damage = 0;
                repaired += 1;
            } else if is_potentially_repairable(item)
                && item.damage != 0
                && exclusion::has_exclusion_tag(tags, &snapshot.exclusions, item)
            {
                skipped_excluded = true;
            }
        }

        debug!(actor = %actor, repaired, skipped_excluded, cost, "repaired inventory");
        self.play(&snapshot, actor, CooldownTrack::All);
        Ok(skipped_excluded)
    }

    fn repairable(&self, snapshot: &ConfigSnapshot, item: &Item) -> bool {
        is_potentially_repairable(item)
            && item.damage != 0
            && !exclusion::has_exclusion_tag(self.ports.tags.as_ref(), &snapshot.exclusions, item)
    }

    fn item_cost(&self, snapshot: &ConfigSnapshot, actor: &ActorId, item: &Item) -> f64 {
        if self.is_bypassing_cost(actor) || !self.repairable(snapshot, item) {
            return 0.0;
        }

        let base = match first_match(&snapshot.cost_exceptions, item) {
            Some((index, exception)) => {
                debug!(index, exception = %exception.label, cost = exception.cost, "cost exception matched");
                exception.cost
            }
            None => snapshot.default_cost,
        };

        (base + f64::from(item.damage) * snapshot.durability_multiplier) * f64::from(item.amount)
    }

    fn inventory_cost(
        &self,
        snapshot: &ConfigSnapshot,
        actor: &ActorId,
        inventory: &dyn InventorySource,
    ) -> f64 {
        inventory
            .items(actor)
            .into_iter()
            .filter(|item| !item.is_empty())
            .map(|item| self.item_cost(snapshot, actor, item))
            .sum()
    }

    fn currency_for(&self, snapshot: &ConfigSnapshot) -> RepairResult<Option<&dyn CurrencySink>> {
        if !snapshot.economy_enabled {
            return Ok(None);
        }
        self.ports
            .currency
            .as_deref()
            .map(Some)
            .ok_or(RepairError::MissingCollaborator { port: "currency" })
    }

    fn start_cooldown(&self, snapshot: &ConfigSnapshot, actor: &ActorId, track: CooldownTrack) {
        let duration = snapshot.cooldown(track);
        let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        let expires_at = self.ports.clock.now_ms().saturating_add(millis);

        lock_book(&self.cooldowns).set(*actor, track, expires_at);
        debug!(actor = %actor, track = %track, expires_at, "cooldown started");

        let book = Arc::clone(&self.cooldowns);
        let actor = *actor;
        self.ports.scheduler.run_after(
            duration,
            Box::new(move || {
                if lock_book(&book).prune(&actor, track, expires_at) {
                    debug!(actor = %actor, track = %track, "cooldown pruned");
                }
            }),
        );
    }

    fn play(&self, snapshot: &ConfigSnapshot, actor: &ActorId, track: CooldownTrack) {
        let cue = FeedbackCue {
            track,
            sound: snapshot.sound(track).to_string(),
        };
        self.ports.feedback.play(actor, &cue);
    }
}

fn lock_book(book: &Mutex<CooldownBook>) -> MutexGuard<'_, CooldownBook> {
    book.lock().unwrap_or_else(PoisonError::into_inner)
}
