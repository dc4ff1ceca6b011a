//! Stable error codes for log correlation.

pub const STORAGE_ERROR: &str = "GAUGE_STORAGE_ERROR";
pub const STORAGE_EXECUTE: &str = "GAUGE_STORAGE_EXECUTE";
pub const STORAGE_COMMIT: &str = "GAUGE_STORAGE_COMMIT";
pub const ROW_COUNT_MISMATCH: &str = "GAUGE_ROW_COUNT_MISMATCH";
pub const INVALID_TABLE_NAME: &str = "GAUGE_INVALID_TABLE_NAME";
pub const BACKPRESSURE_TIMEOUT: &str = "GAUGE_BACKPRESSURE_TIMEOUT";
pub const BUFFER_DISCONNECTED: &str = "GAUGE_BUFFER_DISCONNECTED";

/// Maps an error to its stable, machine-readable code.
pub trait GaugeErrorCode {
    fn error_code(&self) -> &'static str;
}
