//! Database connection configuration.
//!
//! Every field here maps to exactly one connection setting in
//! `gauge-storage`'s connection opener; nothing is assembled from field
//! names at runtime.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the SQLite connection handed to the writer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file path. Unset opens an in-memory database.
    pub path: Option<PathBuf>,
    /// Max wait on a locked database, per statement. This bounds execute,
    /// rollback, and commit individually during a flush. Default: 5000 ms.
    pub busy_timeout_ms: Option<u64>,
    /// WAL journal mode. Default: true.
    pub wal: Option<bool>,
    /// PRAGMA synchronous level ("OFF", "NORMAL", "FULL", "EXTRA").
    /// Default: "NORMAL".
    pub synchronous: Option<String>,
}

impl DatabaseConfig {
    /// Effective per-statement busy timeout.
    pub fn effective_busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms.unwrap_or(5000))
    }

    /// Effective WAL setting.
    pub fn effective_wal(&self) -> bool {
        self.wal.unwrap_or(true)
    }

    /// Effective synchronous level.
    pub fn effective_synchronous(&self) -> &str {
        self.synchronous.as_deref().unwrap_or("NORMAL")
    }
}
