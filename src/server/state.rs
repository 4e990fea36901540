//! Application state shared across HTTP handlers.

use crate::config::Config;
use crate::core::providers::GenericProvider;
use crate::core::router::{HealthRegistry, ProviderDirectory};
use std::sync::Arc;

/// Shared resources handed to every request handler. Built once at
/// startup from a [`crate::core::Gateway`] and cloned cheaply per worker
/// (everything inside is an `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<HealthRegistry>,
    pub directory: Arc<dyn ProviderDirectory>,
    pub provider: GenericProvider,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        registry: Arc<HealthRegistry>,
        directory: Arc<dyn ProviderDirectory>,
        provider: GenericProvider,
    ) -> Self {
        Self {
            config,
            registry,
            directory,
            provider,
        }
    }
}
