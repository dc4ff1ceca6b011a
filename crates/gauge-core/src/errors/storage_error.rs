//! Storage-layer errors for the batched write path.

use super::error_code::{self, GaugeErrorCode};

/// Errors that can occur in the storage layer.
///
/// Rollback failures have no variant: they are logged at the rollback site
/// and never override the primary error.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("batch execute failed: {message}")]
    Execute { message: String },

    #[error("batch commit failed: {message}")]
    Commit { message: String },

    #[error("affected row count {actual} != submitted record count {expected}")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error("invalid table name: {name:?}")]
    InvalidTableName { name: String },
}

impl StorageError {
    /// A fatal error signals a partial or undefined write with no safe
    /// reconciliation strategy. The coordinator loop terminates on it
    /// instead of retrying.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RowCountMismatch { .. })
    }
}

impl GaugeErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Execute { .. } => error_code::STORAGE_EXECUTE,
            Self::Commit { .. } => error_code::STORAGE_COMMIT,
            Self::RowCountMismatch { .. } => error_code::ROW_COUNT_MISMATCH,
            Self::InvalidTableName { .. } => error_code::INVALID_TABLE_NAME,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
