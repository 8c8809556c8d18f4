use crate::error::{ConfigError, ConfigResult};
use crate::raw::{RawConfig, RawCostException, RawSounds, parse_config};
use crate::registry::CategoryRegistry;
use repairkit_types::{CategoryId, CooldownTrack, Item, ItemMeta};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::{debug, warn};

/// Sound used when a track has no (or a blank) sound configured.
pub const DEFAULT_SOUND: &str = "BLOCK_ANVIL_USE";

/// Validated, immutable configuration.
///
/// A snapshot is rebuilt from scratch on every reload and swapped in as a whole.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    pub hand_cooldown: Duration,
    pub all_cooldown: Duration,
    /// Not validated: zero and negative costs are allowed.
    pub default_cost: f64,
    pub durability_multiplier: f64,
    /// Evaluated in order, first match wins.
    pub cost_exceptions: Vec<CostException>,
    pub exclusions: ExclusionTable,
    pub sounds: FeedbackSounds,
    pub economy_enabled: bool,
}

/// A partial item template with the cost charged for items based on it.
#[derive(Debug, Clone, PartialEq)]
pub struct CostException {
    pub label: String,
    pub template: Item,
    pub cost: f64,
}

/// Category -> variant tags that are never repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionTable {
    by_category: HashMap<CategoryId, BTreeSet<i32>>,
}

impl ExclusionTable {
    /// Adds variants for a category, merging with any already present.
    pub fn insert(&mut self, category: CategoryId, variants: impl IntoIterator<Item = i32>) {
        self.by_category
            .entry(category)
            .or_default()
            .extend(variants);
    }

    pub fn variants(&self, category: &CategoryId) -> Option<&BTreeSet<i32>> {
        self.by_category.get(category).filter(|set| !set.is_empty())
    }

    pub fn is_excluded(&self, category: &CategoryId, variant: i32) -> bool {
        self.variants(category)
            .is_some_and(|set| set.contains(&variant))
    }

    pub fn len(&self) -> usize {
        self.by_category.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, &BTreeSet<i32>)> {
        self.by_category.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSounds {
    pub hand: String,
    pub all: String,
}

impl Default for FeedbackSounds {
    fn default() -> Self {
        Self {
            hand: DEFAULT_SOUND.to_string(),
            all: DEFAULT_SOUND.to_string(),
        }
    }
}

impl ConfigSnapshot {
    /// Validate a raw config into a snapshot.
    ///
    /// Fails on the first missing required key or unknown cost-exception category. Malformed
    /// exclusion entries are logged and skipped.
    pub fn load(raw: &RawConfig, registry: &dyn CategoryRegistry) -> ConfigResult<Self> {
        let cooldown = raw
            .cooldown
            .as_ref()
            .ok_or_else(|| ConfigError::missing_section("cooldown"))?;
        let hand_secs = cooldown
            .hand
            .ok_or_else(|| ConfigError::missing_field("cooldown.hand"))?;
        let all_secs = cooldown
            .all
            .ok_or_else(|| ConfigError::missing_field("cooldown.all"))?;

        let default_cost = raw
            .default_cost
            .ok_or_else(|| ConfigError::missing_field("default-cost"))?;
        let durability_multiplier = raw
            .durability_multiplier
            .ok_or_else(|| ConfigError::missing_field("durability-multiplier"))?;

        let raw_exceptions = raw
            .cost_exceptions
            .as_ref()
            .ok_or_else(|| ConfigError::missing_section("cost-exceptions"))?;

        let cost_exceptions = raw_exceptions
            .iter()
            .enumerate()
            .map(|(index, entry)| load_exception(index, entry, registry))
            .collect::<ConfigResult<Vec<_>>>()?;

        let exclusions = load_exclusions(raw.exclude.as_ref(), registry);

        Ok(Self {
            hand_cooldown: Duration::from_secs(hand_secs),
            all_cooldown: Duration::from_secs(all_secs),
            default_cost,
            durability_multiplier,
            cost_exceptions,
            exclusions,
            sounds: load_sounds(&raw.sound),
            economy_enabled: raw.economy.enabled,
        })
    }

    /// Parse and validate in one step.
    pub fn from_toml_str(contents: &str, registry: &dyn CategoryRegistry) -> ConfigResult<Self> {
        let raw = parse_config(contents)?;
        Self::load(&raw, registry)
    }

    pub fn cooldown(&self, track: CooldownTrack) -> Duration {
        match track {
            CooldownTrack::Hand => self.hand_cooldown,
            CooldownTrack::All => self.all_cooldown,
        }
    }

    pub fn sound(&self, track: CooldownTrack) -> &str {
        match track {
            CooldownTrack::Hand => &self.sounds.hand,
            CooldownTrack::All => &self.sounds.all,
        }
    }
}

fn load_exception(
    index: usize,
    entry: &RawCostException,
    registry: &dyn CategoryRegistry,
) -> ConfigResult<CostException> {
    let location = format!("cost-exceptions[{index}]");

    let material = entry
        .material
        .as_deref()
        .ok_or_else(|| ConfigError::missing_field(format!("{location}.material")))?;
    let category = registry
        .resolve(material)
        .ok_or_else(|| ConfigError::UnknownCategory {
            name: material.to_string(),
            location: location.clone(),
        })?;

    let meta = ItemMeta {
        display_name: entry.name.clone().filter(|name| !name.is_empty()),
        lore: entry.lore.clone(),
        enchants: entry.enchants.clone(),
        variant: entry.custom_model_data,
    };

    let mut template = Item::new(category);
    if !meta.is_blank() {
        template.meta = Some(meta);
    }

    let cost = entry.cost.unwrap_or_else(|| {
        warn!(exception = %location, "cost exception has no cost, using 0");
        0.0
    });

    debug!(exception = %location, category = %template.category, cost, "loaded cost exception");

    Ok(CostException {
        label: entry.id.clone().unwrap_or(location),
        template,
        cost,
    })
}

fn load_exclusions(table: Option<&toml::Table>, registry: &dyn CategoryRegistry) -> ExclusionTable {
    let mut out = ExclusionTable::default();
    let Some(table) = table else {
        return out;
    };

    for (name, entry) in table {
        let Some(category) = registry.resolve(name) else {
            warn!(category = %name, "skipping exclusion for unknown category");
            continue;
        };

        let variants: BTreeSet<i32> = entry
            .get("customdata")
            .and_then(toml::Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(toml::Value::as_integer)
                    .filter_map(|v| i32::try_from(v).ok())
                    .collect()
            })
            .unwrap_or_default();

        if variants.is_empty() {
            warn!(category = %name, "skipping exclusion without customdata values");
            continue;
        }

        out.insert(category, variants);
    }

    out
}

fn load_sounds(raw: &RawSounds) -> FeedbackSounds {
    let pick = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_uppercase)
            .unwrap_or_else(|| DEFAULT_SOUND.to_string())
    };
    FeedbackSounds {
        hand: pick(&raw.hand),
        all: pick(&raw.all),
    }
}
