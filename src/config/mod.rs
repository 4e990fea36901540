//! Configuration loading and validation.
//!
//! The core owns no environment variables, files, or flags (see router
//! config); this module is the composition root's concern of reading a
//! YAML file plus a handful of env overrides into the structs the core and
//! server are constructed from.

pub mod models;
pub mod validation;

pub use models::{GatewayConfig, MonitoringConfig, ProviderConfig, RouterSettings, ServerConfig};
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub gateway: GatewayConfig,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration from file");

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("failed to read config file: {e}")))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)?;
        let config = Self { gateway };
        config.validate()?;

        debug!("configuration loaded successfully");
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        // best-effort: local development may have a `.env` file, deployed
        // environments set these directly and have no file to load.
        if let Err(e) = dotenvy::dotenv() {
            debug!(error = %e, "no .env file loaded");
        }

        info!("loading configuration from environment variables");
        let gateway = GatewayConfig::from_env()?;
        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    pub fn providers(&self) -> &[ProviderConfig] {
        &self.gateway.providers
    }

    pub fn router(&self) -> &RouterSettings {
        &self.gateway.router
    }

    pub fn monitoring(&self) -> &MonitoringConfig {
        &self.gateway.monitoring
    }

    pub fn validate(&self) -> Result<()> {
        self.gateway.validate()
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.gateway = self.gateway.merge(other.gateway);
        self
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.gateway)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn loads_from_yaml_file() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 9000

providers:
  - id: 1
    name: "acme"
    base_url: "https://api.acme.example/v1"
    api_key: "sk-test"

router:
  failure_threshold: 5
  default_cooldown_secs: 120
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().port, 9000);
        assert_eq!(config.providers().len(), 1);
        assert_eq!(config.router().failure_threshold, 5);
    }
}
