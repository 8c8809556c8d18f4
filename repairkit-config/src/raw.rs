//! Configuration file loading.
//!
//! Discovers and parses `repairkit.toml`. Parsing is deliberately loose: every field is
//! optional at this stage so that [`ConfigSnapshot::load`](crate::ConfigSnapshot::load) can
//! report exactly which required key is missing.

use crate::error::{ConfigError, ConfigResult};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "repairkit.toml";

/// Top-level configuration as written in repairkit.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawConfig {
    /// Base cost of a repair when no exception matches.
    pub default_cost: Option<f64>,

    /// Cost added per point of damage.
    pub durability_multiplier: Option<f64>,

    /// Cooldown durations in seconds.
    pub cooldown: Option<RawCooldowns>,

    /// Feedback sounds per operation.
    pub sound: RawSounds,

    pub economy: RawEconomy,

    /// Ordered exception templates. Required, may be empty.
    pub cost_exceptions: Option<Vec<RawCostException>>,

    /// Category name -> `{ customdata = [..] }`. Kept as a raw table so one malformed entry
    /// does not reject the whole file.
    pub exclude: Option<toml::Table>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCooldowns {
    pub hand: Option<u64>,
    pub all: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSounds {
    pub hand: Option<String>,
    pub all: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEconomy {
    /// Withdraw repair costs through the currency port.
    pub enabled: bool,
}

/// One `[[cost-exceptions]]` entry: a partial item plus its cost.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawCostException {
    /// Optional label used in logs and the CLI.
    pub id: Option<String>,
    pub material: Option<String>,
    pub name: Option<String>,
    pub lore: Vec<String>,
    pub enchants: BTreeMap<String, u32>,
    pub custom_model_data: Option<i32>,
    pub cost: Option<f64>,
}

/// Discover the repairkit.toml config file.
///
/// Returns `None` if no config file is found in `root`.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a repairkit.toml config file.
pub fn load_config(path: &Utf8Path) -> ConfigResult<RawConfig> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_config(&contents)
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> ConfigResult<RawConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Toml {
        message: e.to_string(),
    })
}
