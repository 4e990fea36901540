//! Construction-time settings for the Health Registry, as read from config.

use crate::config::validation::Validate;
use crate::core::router::config::RouterConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterSettings {
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    #[serde(default = "default_cooldown_secs")]
    pub default_cooldown_secs: u64,
}

fn default_failure_threshold() -> u32 {
    3
}

fn default_cooldown_secs() -> u64 {
    60 * 60
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            default_cooldown_secs: default_cooldown_secs(),
        }
    }
}

impl Validate for RouterSettings {
    fn validate(&self) -> Result<(), String> {
        if self.failure_threshold == 0 {
            return Err("router.failure_threshold must be positive".into());
        }
        if self.default_cooldown_secs == 0 {
            return Err("router.default_cooldown_secs must be positive".into());
        }
        Ok(())
    }
}

impl From<&RouterSettings> for RouterConfig {
    fn from(settings: &RouterSettings) -> Self {
        RouterConfig {
            failure_threshold: settings.failure_threshold,
            default_cooldown: Duration::from_secs(settings.default_cooldown_secs),
        }
    }
}
