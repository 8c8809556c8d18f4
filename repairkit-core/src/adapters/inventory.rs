use repairkit_domain::ports::InventorySource;
use repairkit_types::{ActorId, Item};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One actor's slots and the index of the slot held in hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSlots {
    #[serde(default)]
    pub slots: Vec<Item>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand: Option<usize>,
}

impl ActorSlots {
    fn hand_index(&self) -> Option<usize> {
        self.hand
            .filter(|&i| self.slots.get(i).is_some_and(|item| !item.is_empty()))
    }
}

/// Slot-based inventories keyed by actor.
///
/// Empty slots are kept in place but never yielded, and slot order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotInventory {
    actors: BTreeMap<ActorId, ActorSlots>,
}

impl SlotInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, actor: ActorId, slots: ActorSlots) {
        self.actors.insert(actor, slots);
    }

    /// Append an item to the actor's slots, returning its index.
    pub fn give(&mut self, actor: ActorId, item: Item) -> usize {
        let slots = &mut self.actors.entry(actor).or_default().slots;
        slots.push(item);
        slots.len() - 1
    }

    pub fn set_hand(&mut self, actor: ActorId, index: Option<usize>) {
        self.actors.entry(actor).or_default().hand = index;
    }

    pub fn slot(&self, actor: &ActorId, index: usize) -> Option<&Item> {
        self.actors.get(actor).and_then(|s| s.slots.get(index))
    }

    pub fn actors(&self) -> impl Iterator<Item = &ActorId> {
        self.actors.keys()
    }

    pub fn slots(&self, actor: &ActorId) -> &[Item] {
        self.actors
            .get(actor)
            .map(|s| s.slots.as_slice())
            .unwrap_or_default()
    }
}

impl InventorySource for SlotInventory {
    fn items(&self, actor: &ActorId) -> Vec<&Item> {
        self.slots(actor)
            .iter()
            .filter(|item| !item.is_empty())
            .collect()
    }

    fn items_mut(&mut self, actor: &ActorId) -> Vec<&mut Item> {
        self.actors
            .get_mut(actor)
            .map(|s| {
                s.slots
                    .iter_mut()
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn hand(&self, actor: &ActorId) -> Option<&Item> {
        let slots = self.actors.get(actor)?;
        slots.hand_index().and_then(|i| slots.slots.get(i))
    }

    fn hand_mut(&mut self, actor: &ActorId) -> Option<&mut Item> {
        let slots = self.actors.get_mut(actor)?;
        let index = slots.hand_index()?;
        slots.slots.get_mut(index)
    }
}
