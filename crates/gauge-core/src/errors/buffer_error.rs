//! Enqueue-side errors returned to producers.

use super::error_code::{self, GaugeErrorCode};

/// Errors visible to callers of `add_datapoint`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BufferError {
    /// The bounded channel stayed full for the whole enqueue wait.
    /// The caller may retry or drop the record.
    #[error("buffer enqueue timed out under backpressure")]
    BackpressureTimeout,

    /// The coordinator loop is gone; no further records will be accepted.
    #[error("write buffer coordinator has shut down")]
    Disconnected,
}

impl GaugeErrorCode for BufferError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::BackpressureTimeout => error_code::BACKPRESSURE_TIMEOUT,
            Self::Disconnected => error_code::BUFFER_DISCONNECTED,
        }
    }
}
