//! Configuration for the repairkit engine.
//!
//! Reading happens in two steps: the file is parsed into a tolerant [`RawConfig`], then
//! [`ConfigSnapshot::load`] validates it into an immutable snapshot. Only a fully validated
//! snapshot is ever handed to the engine, so a broken reload never leaves it half-configured.

mod error;
mod raw;
mod registry;
mod snapshot;

pub use error::{ConfigError, ConfigResult};
pub use raw::{
    CONFIG_FILE_NAME, RawConfig, RawCooldowns, RawCostException, RawEconomy, RawSounds,
    discover_config, load_config, parse_config,
};
pub use registry::{CategoryRegistry, OpenCategoryRegistry, StaticCategoryRegistry};
pub use snapshot::{
    ConfigSnapshot, CostException, DEFAULT_SOUND, ExclusionTable, FeedbackSounds,
};
