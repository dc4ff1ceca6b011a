//! Unified storage engine: connection + writer + buffer.
//!
//! Constructed explicitly once at process start and injected by
//! reference into the ingestion layer; there is no ambient singleton.

use gauge_core::config::CollectorConfig;
use gauge_core::errors::{BufferError, StorageError};
use gauge_core::Measurement;

use crate::batch::buffer::{FlushStats, WriteBuffer};
use crate::batch::writer::SqliteWriter;
use crate::connection;

/// Owns the write-buffer coordinator and its dedicated SQLite connection.
pub struct StorageEngine {
    buffer: WriteBuffer,
}

impl std::fmt::Debug for StorageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageEngine").finish_non_exhaustive()
    }
}

impl StorageEngine {
    /// Open the configured database, wire the transactional writer to it,
    /// and spawn the coordinator. The connection moves to the coordinator
    /// thread and lives exactly as long as it does.
    pub fn open(config: &CollectorConfig) -> Result<Self, StorageError> {
        let conn = connection::open(&config.database)?;
        let writer = SqliteWriter::new(conn, config.buffer.effective_table())?;
        let buffer = WriteBuffer::spawn(writer, &config.buffer);
        Ok(Self { buffer })
    }

    /// Enqueue one pre-validated measurement.
    pub fn add_datapoint(&self, m: Measurement) -> Result<(), BufferError> {
        self.buffer.add_datapoint(m)
    }

    /// Stop the coordinator, flush what remains, and report totals.
    pub fn shutdown(self) -> Result<FlushStats, StorageError> {
        self.buffer.shutdown()
    }
}
