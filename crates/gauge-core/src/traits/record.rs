//! Flatten capability for persistable records.

use rusqlite::types::Value;

/// A record that flattens into an ordered scalar sequence matching the
/// persisted column order.
///
/// Every record in a batch must flatten to the same field count. Batches
/// are monomorphic over one record type, so a mixed-shape batch cannot be
/// constructed.
pub trait Record {
    fn flatten(&self) -> Vec<Value>;
}
