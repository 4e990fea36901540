//! # provider-gateway
//!
//! A health-aware AI provider gateway: routes chat, vision, image, and
//! audio requests across a pool of (provider, model) candidates, tracking
//! each candidate's recent behavior and failing over when the preferred
//! choice is unhealthy or rate-limited.
//!
//! The hard part lives in [`core::router`]: the per-capability health
//! registry, the failure-threshold state machine, the error classifier
//! that tells a quota error from a transient one, and the failover driver
//! that walks the candidate list in priority order.
//!
//! ```rust,no_run
//! use provider_gateway::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let server = server::HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

pub use config::Config;
pub use core::Gateway;
pub use utils::error::{GatewayError, Result};

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build metadata stamped in by `build.rs`, surfaced on `/health` so an
/// operator can tell which commit is actually running.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_time: &'static str,
    pub git_hash: &'static str,
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
