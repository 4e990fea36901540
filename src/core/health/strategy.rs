//! Probe Strategy (C4) interface: one implementation per capability.

use super::types::ProbeOutcome;
use crate::config::models::ProviderConfig;
use crate::core::router::entry::EntrySnapshot;
use async_trait::async_trait;
use reqwest::Client;

#[async_trait]
pub trait ProbeStrategy: Send + Sync {
    /// Perform a minimal real request against `provider` for `entry` and
    /// report latency or a classifiable failure. Never panics on a
    /// network error — that is itself the failure being probed for.
    async fn probe(&self, entry: &EntrySnapshot, provider: &ProviderConfig, client: &Client) -> ProbeOutcome;
}
