//! Logging initialization
//!
//! Thin wrapper around `tracing-subscriber` so `main.rs` stays a one-liner
//! and the init policy (env-filter, target width) lives in one place.

use tracing_subscriber::EnvFilter;

/// Initialize the global `tracing` subscriber.
///
/// Honors `RUST_LOG` if set, otherwise defaults to `info` for this crate and
/// `warn` for dependencies.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,provider_gateway=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();
}
