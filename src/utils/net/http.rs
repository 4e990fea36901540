//! HTTP client construction
//!
//! One `reqwest::Client` per logical timeout tier, reused across requests so
//! connection pooling actually helps. The core never owns a client itself —
//! `perform` closures and probe strategies are handed one by the caller.

use reqwest::Client;
use std::time::Duration;

/// Build a `reqwest::Client` with the given per-request timeout.
///
/// Connect timeout is capped at 10s independent of the overall timeout so a
/// dead upstream fails fast rather than consuming the whole budget on the
/// TCP handshake.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10).min(timeout))
        .build()
}
