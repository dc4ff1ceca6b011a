//! Transactional batch writer over one dedicated connection.

use gauge_core::errors::StorageError;
use gauge_core::traits::{Record, StorageSink};
use gauge_core::Measurement;
use rusqlite::{params_from_iter, Connection};
use tracing::{debug, warn};

use super::sql;

/// Writes whole batches as single transactions, enforcing the row-count
/// invariant. Stateless apart from the connection and target table.
pub struct SqliteWriter {
    conn: Connection,
    table: String,
}

impl std::fmt::Debug for SqliteWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteWriter")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl SqliteWriter {
    /// The connection should come from `connection::open`, which applies
    /// the busy-timeout deadline bounding every statement below.
    pub fn new(conn: Connection, table: &str) -> Result<Self, StorageError> {
        sql::validate_table_name(table)?;
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    /// Insert the whole batch in one transaction, or nothing.
    ///
    /// The affected-row count must equal the batch length; a mismatch
    /// signals a partial or undefined write, is rolled back, and comes
    /// back as the fatal `RowCountMismatch`. Rollback failures on the
    /// error paths are logged and never override the primary error.
    pub fn write_batch<R: Record>(&self, batch: &[R]) -> Result<(), StorageError> {
        if batch.is_empty() {
            return Ok(());
        }
        let columns = batch[0].flatten().len();
        let mut args = Vec::with_capacity(batch.len() * columns);
        for record in batch {
            args.extend(record.flatten());
        }
        let query = sql::build_insert(&self.table, batch.len(), columns);

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| StorageError::Execute {
                message: format!("begin transaction: {e}"),
            })?;
        let affected = match tx.execute(&query, params_from_iter(args)) {
            Ok(n) => n,
            Err(e) => {
                if let Err(rb) = tx.rollback() {
                    warn!(error = %rb, "rollback after failed batch execute also failed");
                }
                return Err(StorageError::Execute {
                    message: e.to_string(),
                });
            }
        };
        if affected != batch.len() {
            if let Err(rb) = tx.rollback() {
                warn!(error = %rb, "rollback after row-count mismatch failed");
            }
            return Err(StorageError::RowCountMismatch {
                expected: batch.len(),
                actual: affected,
            });
        }
        tx.commit().map_err(|e| StorageError::Commit {
            message: e.to_string(),
        })?;
        debug!(rows = batch.len(), table = %self.table, "batch committed");
        Ok(())
    }
}

impl StorageSink for SqliteWriter {
    fn write(&mut self, batch: &[Measurement]) -> Result<(), StorageError> {
        self.write_batch(batch)
    }
}
