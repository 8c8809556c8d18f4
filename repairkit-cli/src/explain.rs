//! Per-exception match report for the `repairkit explain` command.
//!
//! Walks every cost exception in load order against the item's normalized copy, so a
//! config author can see which template wins and which later ones it shadows.

use repairkit_config::ConfigSnapshot;
use repairkit_domain::mismatch;
use repairkit_types::Item;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The first matching exception; its cost is used.
    Selected,
    /// Matches, but an earlier exception already won.
    Shadowed,
    /// Does not match, with the first failed constraint.
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainRow {
    pub index: usize,
    pub label: String,
    pub cost: f64,
    pub outcome: Outcome,
}

pub fn explain_item(snapshot: &ConfigSnapshot, item: &Item) -> Vec<ExplainRow> {
    let candidate = item.normalized();
    let mut selected = false;

    snapshot
        .cost_exceptions
        .iter()
        .enumerate()
        .map(|(index, exception)| {
            let outcome = match mismatch(&candidate, &exception.template) {
                Some(reason) => Outcome::Rejected(reason.to_string()),
                None if selected => Outcome::Shadowed,
                None => {
                    selected = true;
                    Outcome::Selected
                }
            };
            ExplainRow {
                index,
                label: exception.label.clone(),
                cost: exception.cost,
                outcome,
            }
        })
        .collect()
}

pub fn render_text(snapshot: &ConfigSnapshot, item: &Item, rows: &[ExplainRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!("ITEM: {}\n", item.category));
    out.push_str("--------------------------------------------------------------------------------\n");

    if rows.is_empty() {
        out.push_str("No cost exceptions configured.\n");
    }
    for row in rows {
        let outcome = match &row.outcome {
            Outcome::Selected => "SELECTED".to_string(),
            Outcome::Shadowed => "matches, shadowed by an earlier exception".to_string(),
            Outcome::Rejected(reason) => format!("no match ({reason})"),
        };
        out.push_str(&format!(
            "  [{}] {:<24} cost {:>8.2}  {}\n",
            row.index, row.label, row.cost, outcome
        ));
    }

    let base = rows
        .iter()
        .find(|row| row.outcome == Outcome::Selected)
        .map(|row| format!("{:.2} from {}", row.cost, row.label))
        .unwrap_or_else(|| format!("{:.2} (default-cost)", snapshot.default_cost));
    out.push('\n');
    out.push_str(&format!("Base cost: {base}\n"));
    out.push_str(&format!(
        "Per damage point: {:.2}\n",
        snapshot.durability_multiplier
    ));
    out
}
