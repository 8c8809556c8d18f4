//! Exclusion from repair.
//!
//! An item is excluded when it carries the persistent exclusion tag, or when its category
//! lists its variant tag in the configured exclusion table. The two checks are independent.

use crate::ports::TagStore;
use repairkit_config::ExclusionTable;
use repairkit_types::{Item, TagValue, tag_keys};

pub fn has_exclusion_tag(tags: &dyn TagStore, table: &ExclusionTable, item: &Item) -> bool {
    if item.is_empty() {
        return false;
    }

    if tags.contains(item, tag_keys::EXCLUDE) {
        return true;
    }

    match (table.variants(&item.category), item.variant()) {
        (Some(excluded), Some(variant)) => excluded.contains(&variant),
        _ => false,
    }
}

/// Mark an item as excluded. Empty or already tagged items are returned unchanged.
pub fn add_exclusion_tag(tags: &dyn TagStore, item: Item) -> Item {
    if item.is_empty() || tags.contains(&item, tag_keys::EXCLUDE) {
        return item;
    }
    tags.set(item, tag_keys::EXCLUDE, TagValue::Bool(true))
}

/// Remove the exclusion tag. Empty or untagged items are returned unchanged.
pub fn remove_exclusion_tag(tags: &dyn TagStore, item: Item) -> Item {
    if item.is_empty() || !tags.contains(&item, tag_keys::EXCLUDE) {
        return item;
    }
    tags.delete(item, tag_keys::EXCLUDE)
}
