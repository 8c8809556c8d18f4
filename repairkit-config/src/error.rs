//! Error types for repairkit-config.
//!
//! Every variant is fatal for the reload that produced it; the caller keeps the previous
//! snapshot. Malformed optional entries never surface here, they are skipped while loading.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("read config {path}: {message}")]
    Io { path: Utf8PathBuf, message: String },

    /// The file is not valid TOML or a value has the wrong type.
    #[error("invalid TOML: {message}")]
    Toml { message: String },

    /// A required section is absent.
    #[error("missing required section `{key}`")]
    MissingSection { key: String },

    /// A required scalar field is absent.
    #[error("missing required field `{key}`")]
    MissingField { key: String },

    /// A cost exception names a category the host does not know.
    #[error("unknown category `{name}` in {location}")]
    UnknownCategory { name: String, location: String },
}

impl ConfigError {
    pub(crate) fn missing_section(key: &str) -> Self {
        ConfigError::MissingSection {
            key: key.to_string(),
        }
    }

    pub(crate) fn missing_field(key: impl Into<String>) -> Self {
        ConfigError::MissingField { key: key.into() }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
