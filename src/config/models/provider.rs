//! Provider Directory (C2) configuration rows.

use crate::config::validation::Validate;
use serde::{Deserialize, Serialize};

/// One row of the provider directory: id, display name, base URL,
/// credential, enabled flag. Read-mostly; mutation happens outside the
/// core on admin actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: i64,
    pub name: String,
    pub base_url: String,
    /// Bearer credential sent as `Authorization: Bearer <api_key>`.
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("provider name must not be empty".into());
        }
        crate::config::validation::ssrf::validate_base_url(&self.base_url)?;
        if self.api_key.trim().is_empty() {
            return Err(format!("provider '{}' has an empty api_key", self.name));
        }
        Ok(())
    }
}
