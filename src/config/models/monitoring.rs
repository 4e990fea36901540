//! Settings for the external probe scheduler (C7's default runner).

use crate::config::validation::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// How often the scheduler walks the registry and re-probes every entry.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Delay between probes within one sweep, to avoid bursting a provider.
    #[serde(default = "default_inter_probe_delay_ms")]
    pub inter_probe_delay_ms: u64,
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_inter_probe_delay_ms() -> u64 {
    2_000
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval_secs(),
            inter_probe_delay_ms: default_inter_probe_delay_ms(),
        }
    }
}

impl Validate for MonitoringConfig {
    fn validate(&self) -> Result<(), String> {
        if self.sweep_interval_secs == 0 {
            return Err("monitoring.sweep_interval_secs must be positive".into());
        }
        Ok(())
    }
}
