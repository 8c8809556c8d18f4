use cucumber::{World, given, then, when};
use repairkit_bdd::ScenarioConfig;
use repairkit_core::{
    DeferredScheduler, EngineBuilder, ItemTagStore, Ledger, ManualClock, PermissionSet,
    RecordingFeedback, RepairEngine, SlotInventory,
};
use repairkit_domain::add_exclusion_tag;
use repairkit_domain::ports::InventorySource;
use repairkit_types::{ActorId, CooldownTrack, Item, ItemMeta};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Default, World)]
pub struct RepairWorld {
    config: ScenarioConfig,
    engine: Option<RepairEngine>,
    clock: Arc<ManualClock>,
    perms: Arc<PermissionSet>,
    scheduler: Option<Arc<DeferredScheduler>>,
    feedback: Arc<RecordingFeedback>,
    ledger: Arc<Ledger>,
    inventory: SlotInventory,
    slots: HashMap<String, usize>,
    actor: ActorId,
    cost: Option<f64>,
    outcome: Option<Result<bool, String>>,
}

impl fmt::Debug for RepairWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepairWorld")
            .field("config", &self.config)
            .field("engine_built", &self.engine.is_some())
            .field("inventory", &self.inventory)
            .field("cost", &self.cost)
            .field("outcome", &self.outcome)
            .finish()
    }
}

impl RepairWorld {
    fn ensure_engine(&mut self) {
        if self.engine.is_some() {
            return;
        }
        let snapshot = self.config.snapshot().expect("scenario config is valid");
        let scheduler = Arc::new(DeferredScheduler::new(self.clock.clone()));
        let engine = EngineBuilder::new(snapshot)
            .clock(self.clock.clone())
            .permissions(self.perms.clone())
            .scheduler(scheduler.clone())
            .feedback(self.feedback.clone())
            .currency(self.ledger.clone())
            .build();
        self.scheduler = Some(scheduler);
        self.engine = Some(engine);
    }

    fn engine(&self) -> &RepairEngine {
        self.engine.as_ref().expect("engine built")
    }

    fn give(&mut self, item: Item) -> usize {
        let key = item.category.to_string();
        let index = self.inventory.give(self.actor, item);
        self.slots.insert(key, index);
        index
    }

    fn damage_of(&self, category: &str) -> u32 {
        let index = self.slots[&Item::new(category).category.to_string()];
        self.inventory
            .slot(&self.actor, index)
            .expect("slot exists")
            .damage
    }

    fn remaining(&mut self, track: CooldownTrack) -> u64 {
        self.ensure_engine();
        self.engine().remaining_cooldown_ms(&self.actor, track)
    }
}

fn tool(category: &str, damage: u32) -> Item {
    Item::new(category).with_max_damage(1561).with_damage(damage)
}

// ============================================================================
// Configuration
// ============================================================================

#[given(expr = "a repair config with default cost {float} and durability multiplier {float}")]
async fn config_costs(world: &mut RepairWorld, default_cost: f64, multiplier: f64) {
    world.config.default_cost = default_cost;
    world.config.durability_multiplier = multiplier;
}

#[given(expr = "a repair config with hand cooldown {int} seconds and inventory cooldown {int} seconds")]
async fn config_cooldowns(world: &mut RepairWorld, hand: u64, all: u64) {
    world.config.hand_secs = hand;
    world.config.all_secs = all;
}

#[given(expr = "a cost exception for {string} costing {float}")]
async fn cost_exception(world: &mut RepairWorld, material: String, cost: f64) {
    world.config.add_exception(&material, None, cost);
}

#[given(expr = "a cost exception for {string} named {string} costing {float}")]
async fn named_cost_exception(world: &mut RepairWorld, material: String, name: String, cost: f64) {
    world.config.add_exception(&material, Some(&name), cost);
}

#[given(expr = "items of {string} with variant {int} are excluded")]
async fn variant_exclusion(world: &mut RepairWorld, material: String, variant: i32) {
    world.config.add_exclusion(&material, vec![variant]);
}

#[given("economy integration is enabled")]
async fn economy_enabled(world: &mut RepairWorld) {
    world.config.economy = true;
}

// ============================================================================
// Actor state
// ============================================================================

#[given(expr = "the actor has a balance of {float}")]
async fn balance(world: &mut RepairWorld, amount: f64) {
    world.ledger.deposit(world.actor, amount);
}

#[given(expr = "the actor has the permission {string}")]
async fn has_permission(world: &mut RepairWorld, permission: String) {
    world.perms.grant(world.actor, permission);
}

#[given(expr = "the actor holds a {string} with damage {int}")]
async fn holds(world: &mut RepairWorld, category: String, damage: u32) {
    let index = world.give(tool(&category, damage));
    world.inventory.set_hand(world.actor, Some(index));
}

#[given(expr = "the actor holds a {string} named {string} with damage {int}")]
async fn holds_named(world: &mut RepairWorld, category: String, name: String, damage: u32) {
    let item = tool(&category, damage).with_meta(ItemMeta {
        display_name: Some(name),
        ..Default::default()
    });
    let index = world.give(item);
    world.inventory.set_hand(world.actor, Some(index));
}

#[given(expr = "the actor carries a {string} with damage {int}")]
async fn carries(world: &mut RepairWorld, category: String, damage: u32) {
    world.give(tool(&category, damage));
}

#[given(expr = "the actor carries an excluded {string} with damage {int}")]
async fn carries_excluded(world: &mut RepairWorld, category: String, damage: u32) {
    let item = add_exclusion_tag(&ItemTagStore, tool(&category, damage));
    world.give(item);
}

#[given(expr = "the actor carries a {string} with variant {int} and damage {int}")]
async fn carries_variant(world: &mut RepairWorld, category: String, variant: i32, damage: u32) {
    let item = tool(&category, damage).with_meta(ItemMeta {
        variant: Some(variant),
        ..Default::default()
    });
    world.give(item);
}

// ============================================================================
// Actions
// ============================================================================

#[when("I ask for the cost of the held item")]
async fn ask_cost(world: &mut RepairWorld) {
    world.ensure_engine();
    let held = world
        .inventory
        .hand(&world.actor)
        .expect("actor holds an item")
        .clone();
    world.cost = Some(world.engine().calculate_item_cost(&world.actor, &held));
}

#[when("the actor repairs the held item")]
async fn repair_hand(world: &mut RepairWorld) {
    world.ensure_engine();
    let engine = world.engine.as_ref().expect("engine built");
    let result = engine.repair_hand(&world.actor, &mut world.inventory);
    world.outcome = Some(result.map(|()| false).map_err(|e| e.to_string()));
}

#[when("the actor repairs the whole inventory")]
async fn repair_all(world: &mut RepairWorld) {
    world.ensure_engine();
    let engine = world.engine.as_ref().expect("engine built");
    let result = engine.repair_all(&world.actor, &mut world.inventory);
    world.outcome = Some(result.map_err(|e| e.to_string()));
}

#[when(expr = "{int} ms pass")]
async fn time_passes(world: &mut RepairWorld, millis: i64) {
    world.clock.advance_ms(millis);
}

#[when(expr = "the actor is granted the permission {string}")]
async fn grant(world: &mut RepairWorld, permission: String) {
    world.perms.grant(world.actor, permission);
}

#[when(expr = "the permission {string} is revoked")]
async fn revoke(world: &mut RepairWorld, permission: String) {
    world.perms.revoke(&world.actor, &permission);
}

#[when("the scheduler runs due tasks")]
async fn run_scheduler(world: &mut RepairWorld) {
    world.ensure_engine();
    world.scheduler.as_ref().expect("scheduler built").tick();
}

// ============================================================================
// Outcomes
// ============================================================================

#[then(expr = "the cost is {float}")]
async fn cost_is(world: &mut RepairWorld, expected: f64) {
    assert_eq!(world.cost, Some(expected));
}

#[then(expr = "the hand cooldown remaining is {int} ms")]
async fn hand_remaining(world: &mut RepairWorld, expected: u64) {
    assert_eq!(world.remaining(CooldownTrack::Hand), expected);
}

#[then(expr = "the inventory cooldown remaining is {int} ms")]
async fn all_remaining(world: &mut RepairWorld, expected: u64) {
    assert_eq!(world.remaining(CooldownTrack::All), expected);
}

#[then("the repair reports skipped excluded items")]
async fn reports_skipped(world: &mut RepairWorld) {
    assert_eq!(world.outcome, Some(Ok(true)));
}

#[then("the repair reports no skipped items")]
async fn reports_none_skipped(world: &mut RepairWorld) {
    assert_eq!(world.outcome, Some(Ok(false)));
}

#[then(expr = "the repair fails with {string}")]
async fn repair_fails(world: &mut RepairWorld, message: String) {
    match &world.outcome {
        Some(Err(err)) => assert!(
            err.contains(&message),
            "expected error containing '{message}', got: {err}"
        ),
        other => panic!("expected a failed repair, got {other:?}"),
    }
}

#[then(expr = "the {string} has damage {int}")]
async fn has_damage(world: &mut RepairWorld, category: String, expected: u32) {
    assert_eq!(world.damage_of(&category), expected);
}

#[then(expr = "the actor's balance is {float}")]
async fn balance_is(world: &mut RepairWorld, expected: f64) {
    assert_eq!(world.ledger.balance(&world.actor), expected);
}

#[tokio::main]
async fn main() {
    let features_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("features");
    RepairWorld::cucumber().run_and_exit(features_path).await;
}
