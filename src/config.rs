use std::path::Path;

use log::warn;

use crate::ai::{CacheConfig, SearchConfig};
use crate::error::ConfigError;
use crate::game::{COLS, ROWS};

/// Top-level solver configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub search: SearchConfig,
    pub cache: CacheConfig,
}

impl SolverConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: SolverConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_depth = (ROWS * COLS) as u32;
        if self.search.depth == 0 || self.search.depth > max_depth {
            return Err(ConfigError::Validation(format!(
                "search.depth must be in 1..={max_depth}"
            )));
        }
        if self.cache.max_entries == Some(0) {
            return Err(ConfigError::Validation(
                "cache.max_entries must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&SolverConfig::default()).expect("default config serializes")
    }
}
