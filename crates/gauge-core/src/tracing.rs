//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber with `RUST_LOG`-style filtering,
/// defaulting to `info`. Calling more than once is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
