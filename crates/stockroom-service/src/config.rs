//! Inventory configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use stockroom_core::UpdatePolicy;
use stockroom_db::DbConfig;

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub max_connections: u32,

    /// How zero and empty values in a partial update are read
    pub update_policy: UpdatePolicy,

    /// Cap repaired tools at full condition
    pub clamp_repairs: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            database_path: PathBuf::from("stockroom.db"),
            max_connections: 5,
            update_policy: UpdatePolicy::Strict,
            clamp_repairs: true,
        }
    }
}

impl InventoryConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `STOCKROOM_DATABASE_PATH` | `stockroom.db` |
    /// | `STOCKROOM_MAX_CONNECTIONS` | `5` |
    /// | `STOCKROOM_UPDATE_POLICY` | `strict` |
    /// | `STOCKROOM_CLAMP_REPAIRS` | `true` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = InventoryConfig::default();

        let config = InventoryConfig {
            database_path: lookup("STOCKROOM_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            max_connections: match lookup("STOCKROOM_MAX_CONNECTIONS") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("STOCKROOM_MAX_CONNECTIONS".to_string()))?,
                None => defaults.max_connections,
            },

            update_policy: match lookup("STOCKROOM_UPDATE_POLICY") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("STOCKROOM_UPDATE_POLICY".to_string()))?,
                None => defaults.update_policy,
            },

            clamp_repairs: match lookup("STOCKROOM_CLAMP_REPAIRS") {
                Some(raw) => raw
                    .trim()
                    .to_ascii_lowercase()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("STOCKROOM_CLAMP_REPAIRS".to_string()))?,
                None => defaults.clamp_repairs,
            },
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "STOCKROOM_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Pool settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone()).max_connections(self.max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
