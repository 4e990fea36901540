//! Top-level configuration document, as loaded from YAML or environment.

use super::monitoring::MonitoringConfig;
use super::provider::ProviderConfig;
use super::router::RouterSettings;
use super::server::ServerConfig;
use crate::config::validation::Validate;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub router: RouterSettings,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

impl GatewayConfig {
    /// Load server/router/monitoring settings from environment variables,
    /// falling back to defaults. Providers are never sourced from the
    /// environment — they come from the config file only.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("GATEWAY_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("GATEWAY_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| GatewayError::Config(format!("invalid GATEWAY_PORT: {port}")))?;
        }
        if let Ok(workers) = std::env::var("GATEWAY_WORKERS") {
            config.server.workers = workers
                .parse()
                .map_err(|_| GatewayError::Config(format!("invalid GATEWAY_WORKERS: {workers}")))?;
        }
        if let Ok(threshold) = std::env::var("GATEWAY_FAILURE_THRESHOLD") {
            config.router.failure_threshold = threshold.parse().map_err(|_| {
                GatewayError::Config(format!("invalid GATEWAY_FAILURE_THRESHOLD: {threshold}"))
            })?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.server
            .validate()
            .map_err(|e| GatewayError::Validation(format!("server config: {e}")))?;
        self.router
            .validate()
            .map_err(|e| GatewayError::Validation(format!("router config: {e}")))?;
        self.monitoring
            .validate()
            .map_err(|e| GatewayError::Validation(format!("monitoring config: {e}")))?;
        for provider in &self.providers {
            provider
                .validate()
                .map_err(|e| GatewayError::Validation(format!("provider config: {e}")))?;
        }
        Ok(())
    }

    /// `other` wins on every field it sets explicitly; used to layer file
    /// config over defaults and env overrides over both.
    pub fn merge(mut self, other: Self) -> Self {
        self.server = other.server;
        if !other.providers.is_empty() {
            self.providers = other.providers;
        }
        self.router = other.router;
        self.monitoring = other.monitoring;
        self
    }
}
