//! The health-aware capability router and everything that feeds it.

pub mod capability;
pub mod health;
pub mod models;
pub mod providers;
pub mod router;

pub use capability::Capability;

use crate::config::Config;
use crate::utils::error::Result;
use health::{CancellationToken, DefaultScheduler};
use router::{CachedProviderDirectory, HealthRegistry, ProviderDirectory, RouterConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Everything the server and the scheduler need: the registry, the
/// directory, and a scheduler wired up with default probe strategies.
///
/// Constructed once at startup (see design notes on global singletons)
/// and handed to request handlers and the background scheduler by
/// reference, never recreated per request.
pub struct Gateway {
    pub registry: Arc<HealthRegistry>,
    pub directory: Arc<dyn ProviderDirectory>,
    pub scheduler: Arc<DefaultScheduler>,
    cancellation: CancellationToken,
}

impl Gateway {
    pub async fn new(config: &Config) -> Result<Self> {
        info!("initializing gateway core");

        let router_config: RouterConfig = config.router().into();
        let registry = Arc::new(HealthRegistry::new(router_config));

        for provider in config.providers() {
            for capability in Capability::ALL {
                // Bootstrap registration: a provider with no per-capability
                // model list (outside this spec's scope) registers under
                // an empty model name, matching capabilities like audio
                // transcription that expose a single endpoint.
                registry.register(capability, provider.id, provider.name.clone(), "", 0);
            }
        }

        let directory: Arc<dyn ProviderDirectory> =
            Arc::new(CachedProviderDirectory::new(config.providers().to_vec()).await);

        let client = crate::utils::net::build_client(Duration::from_secs(30))?;
        let scheduler = Arc::new(DefaultScheduler::new(
            registry.clone(),
            directory.clone(),
            health::default_strategies(),
            client,
            Duration::from_secs(config.monitoring().sweep_interval_secs),
            Duration::from_millis(config.monitoring().inter_probe_delay_ms),
        ));

        info!("gateway core initialized");

        Ok(Self {
            registry,
            directory,
            scheduler,
            cancellation: CancellationToken::new(),
        })
    }

    /// Spawn the background probe sweep loop. Returns the join handle so
    /// the caller can await it during shutdown.
    pub fn spawn_scheduler(&self) -> tokio::task::JoinHandle<()> {
        let scheduler = self.scheduler.clone();
        let cancellation = self.cancellation.clone();
        tokio::spawn(async move {
            scheduler.run_forever(cancellation).await;
        })
    }

    pub fn shutdown(&self) {
        info!("shutting down gateway core");
        self.cancellation.cancel();
    }

    pub fn summary(&self) -> router::summary::GatewaySummary {
        router::summary::summarize(&self.registry)
    }
}
