//! Probe Scheduler Interface (C7) and its default periodic runner.
//!
//! The core defines the contract; nothing inside `core` spawns a timer of
//! its own. `DefaultScheduler` is the one ambient implementation supplied
//! so `main.rs` doesn't have to hand-roll a sweep loop, but it is wired up
//! from the outside exactly like any other implementation would be.

use super::cancellation::CancellationToken;
use super::strategy::ProbeStrategy;
use crate::core::capability::Capability;
use crate::core::router::classifier::{cooldown_for, is_quota};
use crate::core::router::directory::ProviderDirectory;
use crate::core::router::entry::EntryKey;
use crate::core::router::registry::HealthRegistry;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[async_trait]
pub trait ProbeScheduler: Send + Sync {
    /// When the runner should next call `run`.
    fn due_time(&self) -> Instant;

    /// Walk every registered entry across all capabilities, probing each
    /// with the strategy registered for its capability, and feed results
    /// back into the registry through the same quota/unhealthy
    /// classification the Failover Driver uses.
    async fn run(&self, cancellation: &CancellationToken) -> Result<()>;
}

pub struct DefaultScheduler {
    registry: Arc<HealthRegistry>,
    directory: Arc<dyn ProviderDirectory>,
    strategies: HashMap<Capability, Arc<dyn ProbeStrategy>>,
    client: reqwest::Client,
    sweep_interval: Duration,
    inter_probe_delay: Duration,
}

impl DefaultScheduler {
    pub fn new(
        registry: Arc<HealthRegistry>,
        directory: Arc<dyn ProviderDirectory>,
        strategies: HashMap<Capability, Arc<dyn ProbeStrategy>>,
        client: reqwest::Client,
        sweep_interval: Duration,
        inter_probe_delay: Duration,
    ) -> Self {
        Self {
            registry,
            directory,
            strategies,
            client,
            sweep_interval,
            inter_probe_delay,
        }
    }

    /// Drive the scheduler forever, sleeping between sweeps, until the
    /// token is cancelled. Owned by `main.rs`, not by the core.
    pub async fn run_forever(&self, cancellation: CancellationToken) {
        let mut ticker = tokio::time::interval(self.sweep_interval);
        loop {
            ticker.tick().await;
            if cancellation.is_cancelled() {
                return;
            }
            if let Err(err) = self.run(&cancellation).await {
                warn!(error = %err, "probe sweep failed");
            }
        }
    }
}

#[async_trait]
impl ProbeScheduler for DefaultScheduler {
    fn due_time(&self) -> Instant {
        Instant::now() + self.sweep_interval
    }

    async fn run(&self, cancellation: &CancellationToken) -> Result<()> {
        for capability in Capability::ALL {
            let Some(strategy) = self.strategies.get(&capability) else {
                continue;
            };

            for entry in self.registry.list_all(capability) {
                if cancellation.is_cancelled() {
                    return Ok(());
                }

                let Some(provider) = self.directory.get(entry.provider_id).await else {
                    continue;
                };
                if !provider.enabled {
                    continue;
                }

                let outcome = strategy.probe(&entry, &provider, &self.client).await;
                let key = EntryKey::new(entry.capability, entry.provider_id, entry.model_name.clone());

                match outcome.error {
                    None => {
                        self.registry.mark_healthy(&key);
                        debug!(
                            capability = %capability,
                            provider = %entry.provider_name,
                            model = %entry.model_name,
                            latency_ms = outcome.latency_ms,
                            "probe succeeded"
                        );
                    }
                    Some(failure) => {
                        if is_quota(failure.status, &failure.body) {
                            let cooldown = cooldown_for(failure.status, &failure.body);
                            self.registry
                                .set_cooldown(&key, cooldown.as_millis() as u64, &failure.body);
                        } else {
                            self.registry.mark_unhealthy(&key, &failure.body, failure.status);
                        }
                        debug!(
                            capability = %capability,
                            provider = %entry.provider_name,
                            model = %entry.model_name,
                            status = failure.status,
                            "probe failed"
                        );
                    }
                }

                tokio::time::sleep(self.inter_probe_delay).await;
            }
        }
        Ok(())
    }
}
