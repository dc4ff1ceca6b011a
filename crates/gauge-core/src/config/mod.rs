//! Collector configuration, loaded from TOML.

pub mod buffer_config;
pub mod database_config;

pub use buffer_config::BufferConfig;
pub use database_config::DatabaseConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration: `[buffer]` and `[database]` sections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CollectorConfig {
    pub buffer: BufferConfig,
    pub database: DatabaseConfig,
}

impl CollectorConfig {
    /// Parse a TOML document. Missing sections and fields fall back to
    /// defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
