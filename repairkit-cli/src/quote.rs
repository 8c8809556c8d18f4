//! Cost quotes for the `repairkit quote` command.

use repairkit_core::{ActorSlots, RepairEngine, SlotInventory};
use repairkit_domain::ports::InventorySource;
use repairkit_types::ActorId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Inventory file: actor name -> slots.
pub type InventoryFile = BTreeMap<String, ActorSlots>;

/// Actor names paired with their ids, and the inventory keyed by those ids.
pub fn into_slot_inventory(file: InventoryFile) -> (Vec<(String, ActorId)>, SlotInventory) {
    let mut actors = Vec::with_capacity(file.len());
    let mut inventory = SlotInventory::new();
    for (name, slots) in file {
        let id = ActorId::from_name(&name);
        inventory.insert(id, slots);
        actors.push((name, id));
    }
    (actors, inventory)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteLine {
    pub slot: usize,
    pub category: String,
    pub damage: u32,
    pub amount: u32,
    pub repairable: bool,
    pub excluded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorQuote {
    pub actor: String,
    pub hand: Option<usize>,
    pub lines: Vec<QuoteLine>,
    pub total: f64,
}

pub fn quote_actor(
    engine: &RepairEngine,
    inventory: &SlotInventory,
    name: &str,
    actor: &ActorId,
) -> ActorQuote {
    let lines = inventory
        .slots(actor)
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_empty())
        .map(|(slot, item)| {
            let repairable = engine.is_repairable(item);
            QuoteLine {
                slot,
                category: item.category.to_string(),
                damage: item.damage,
                amount: item.amount,
                repairable,
                excluded: engine.has_exclusion_tag(item),
                exception: repairable
                    .then(|| engine.matching_exception(item))
                    .flatten()
                    .map(|m| m.label),
                cost: engine.calculate_item_cost(actor, item),
            }
        })
        .collect();

    let hand = inventory.hand(actor).and_then(|held| {
        inventory
            .slots(actor)
            .iter()
            .position(|item| std::ptr::eq(item, held))
    });

    ActorQuote {
        actor: name.to_string(),
        hand,
        lines,
        total: engine.calculate_inventory_cost(actor, inventory),
    }
}

pub fn render_text(quotes: &[ActorQuote]) -> String {
    let mut out = String::new();
    for quote in quotes {
        out.push_str(&format!("{}\n", quote.actor));
        out.push_str(&format!(
            "  {:<5} {:<24} {:>7} {:>5} {:<10} {:<16} {:>10}\n",
            "SLOT", "CATEGORY", "DAMAGE", "QTY", "STATUS", "EXCEPTION", "COST"
        ));
        for line in &quote.lines {
            let status = if line.excluded {
                "excluded"
            } else if line.repairable {
                "repairable"
            } else {
                "-"
            };
            let marker = if quote.hand == Some(line.slot) { "*" } else { "" };
            out.push_str(&format!(
                "  {:<5} {:<24} {:>7} {:>5} {:<10} {:<16} {:>10.2}\n",
                format!("{}{}", line.slot, marker),
                line.category,
                line.damage,
                line.amount,
                status,
                line.exception.as_deref().unwrap_or("default"),
                line.cost
            ));
        }
        out.push_str(&format!("  total: {:.2}\n", quote.total));
    }
    out
}
