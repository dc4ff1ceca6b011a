//! # gauge-storage
//!
//! SQLite persistence layer for the gauge measurement collector.
//! Connection opening, the bulk-insert statement builder, the
//! transactional batch writer, and the channel-fed write-buffer
//! coordinator thread.

pub mod batch;
pub mod connection;
pub mod engine;

pub use batch::buffer::{FlushStats, WriteBuffer};
pub use batch::writer::SqliteWriter;
pub use engine::StorageEngine;
