//! # gauge-core
//!
//! Foundation crate for the gauge measurement collector.
//! Defines the measurement model, the flatten and storage-sink traits,
//! errors, configuration, and tracing init. Every other crate in the
//! workspace depends on this.

pub mod config;
pub mod errors;
pub mod measurement;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{BufferConfig, CollectorConfig, DatabaseConfig};
pub use errors::error_code::GaugeErrorCode;
pub use errors::{BufferError, StorageError};
pub use measurement::Measurement;
pub use traits::{Record, StorageSink};
