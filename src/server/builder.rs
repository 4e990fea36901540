//! Server builder and the `run_server` entry point used by `main.rs`.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::{info, warn};

pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self { config: None }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("configuration is required".to_string()))?;
        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration (file, falling back to environment and defaults)
/// and run the server to completion.
pub async fn run_server() -> Result<()> {
    info!("starting provider gateway");

    let config_path = std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| "config/gateway.yaml".to_string());

    let config = match Config::from_file(&config_path).await {
        Ok(config) => {
            info!(path = %config_path, "configuration file loaded");
            config
        }
        Err(e) => {
            warn!(path = %config_path, error = %e, "config file load failed, falling back to environment");
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config).await?;
    info!(
        host = %config.server().host,
        port = config.server().port,
        "server ready"
    );

    server.start().await
}
