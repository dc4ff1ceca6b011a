//! Seam between the buffer coordinator and the storage writer.

use crate::errors::StorageError;
use crate::measurement::Measurement;

/// Destination for flushed batches.
///
/// The SQLite implementation writes one transaction per call. Tests
/// substitute recording or failing sinks.
pub trait StorageSink: Send {
    /// Persist the whole batch or none of it. An empty batch is a
    /// successful no-op.
    fn write(&mut self, batch: &[Measurement]) -> Result<(), StorageError>;
}
