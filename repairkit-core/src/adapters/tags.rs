use repairkit_domain::ports::TagStore;
use repairkit_types::{Item, TagValue};

/// Stores tags in the item's own tag compound.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemTagStore;

impl TagStore for ItemTagStore {
    fn contains(&self, item: &Item, key: &str) -> bool {
        item.tags.contains_key(key)
    }

    fn set(&self, mut item: Item, key: &str, value: TagValue) -> Item {
        item.tags.insert(key.to_string(), value);
        item
    }

    fn delete(&self, mut item: Item, key: &str) -> Item {
        item.tags.remove(key);
        item
    }
}
