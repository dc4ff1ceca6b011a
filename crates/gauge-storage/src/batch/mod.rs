//! Batched write path: statement builder, transactional writer, and the
//! write-buffer coordinator.

pub mod buffer;
pub mod sql;
pub mod writer;

pub use buffer::{FlushStats, WriteBuffer};
pub use writer::SqliteWriter;
