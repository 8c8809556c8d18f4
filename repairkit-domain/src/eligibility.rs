use repairkit_types::Item;

/// Could this kind of item ever be repaired?
///
/// Depends only on the item's class and damage capacity, never on its current damage or
/// exclusion state.
pub fn is_potentially_repairable(item: &Item) -> bool {
    !item.class.is_empty()
        && !item.class.is_block()
        && !item.class.is_consumable()
        && item.max_damage > 0
}
