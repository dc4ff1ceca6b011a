//! Write buffer configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the write-buffering subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BufferConfig {
    /// Max buffered records before a forced flush. Also sizes the inbound
    /// channel. Default: 1000.
    pub max_buffered: Option<usize>,
    /// Seconds between periodic flushes. Default: 10.
    pub flush_interval_secs: Option<u64>,
    /// Target table for bulk inserts. Default: "measurements".
    pub table: Option<String>,
}

impl BufferConfig {
    /// Effective max buffered records, clamped to at least 1.
    pub fn effective_max_buffered(&self) -> usize {
        self.max_buffered.unwrap_or(1000).max(1)
    }

    /// Effective periodic flush interval.
    pub fn effective_flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_secs.unwrap_or(10).max(1))
    }

    /// Effective target table name.
    pub fn effective_table(&self) -> &str {
        self.table.as_deref().unwrap_or("measurements")
    }
}
