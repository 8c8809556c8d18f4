use crate::tag::TagValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Normalized category identifier (material/type name).
///
/// Names are compared case-insensitively by the host's material tables, so the id is stored in
/// upper snake case: `diamond_sword`, `Diamond Sword` and `DIAMOND-SWORD` all become
/// `DIAMOND_SWORD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(name: impl AsRef<str>) -> Self {
        let normalized = name
            .as_ref()
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CategoryId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<CategoryId> for String {
    fn from(value: CategoryId) -> Self {
        value.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse classification of a category, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    /// The "nothing in this slot" sentinel.
    Empty,
    /// Placeable block.
    Block,
    /// Edible or otherwise consumed on use.
    Consumable,
    #[default]
    Other,
}

impl ItemClass {
    pub fn is_empty(self) -> bool {
        matches!(self, ItemClass::Empty)
    }
    pub fn is_block(self) -> bool {
        matches!(self, ItemClass::Block)
    }
    pub fn is_consumable(self) -> bool {
        matches!(self, ItemClass::Consumable)
    }
}

/// Optional descriptive metadata carried by an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lore: Vec<String>,

    /// Enchantment name -> level. Ordered so equality ignores insertion order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub enchants: BTreeMap<String, u32>,

    /// Numeric variant tag (custom model data).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<i32>,
}

impl ItemMeta {
    /// The display name, treating an empty string as unset.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn has_lore(&self) -> bool {
        !self.lore.is_empty()
    }

    pub fn has_enchants(&self) -> bool {
        !self.enchants.is_empty()
    }

    /// True when no field carries a value.
    pub fn is_blank(&self) -> bool {
        self.display_name().is_none()
            && !self.has_lore()
            && !self.has_enchants()
            && self.variant.is_none()
    }
}

/// A stack of items as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub category: CategoryId,

    #[serde(default)]
    pub class: ItemClass,

    /// Current damage; zero means undamaged.
    #[serde(default)]
    pub damage: u32,

    /// Maximum damage the category can take before breaking; zero means not damageable.
    #[serde(default)]
    pub max_damage: u32,

    #[serde(default = "default_amount")]
    pub amount: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ItemMeta>,

    /// Persistent tag compound (backing storage for the default tag store).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, TagValue>,
}

fn default_amount() -> u32 {
    1
}

impl Item {
    pub fn new(category: impl Into<CategoryId>) -> Self {
        Self {
            category: category.into(),
            class: ItemClass::Other,
            damage: 0,
            max_damage: 0,
            amount: 1,
            meta: None,
            tags: BTreeMap::new(),
        }
    }

    /// The empty-slot sentinel.
    pub fn empty() -> Self {
        Self {
            class: ItemClass::Empty,
            amount: 0,
            ..Self::new("AIR")
        }
    }

    pub fn with_class(mut self, class: ItemClass) -> Self {
        self.class = class;
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_max_damage(mut self, max_damage: u32) -> Self {
        self.max_damage = max_damage;
        self
    }

    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_meta(mut self, meta: ItemMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.class.is_empty()
    }

    pub fn variant(&self) -> Option<i32> {
        self.meta.as_ref().and_then(|m| m.variant)
    }

    /// A throwaway copy keyed on the item's kind: damage reset to zero, stack size one.
    pub fn normalized(&self) -> Item {
        Item {
            damage: 0,
            amount: 1,
            ..self.clone()
        }
    }
}
