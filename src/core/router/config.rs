//! Construction-time configuration for the Health Registry.

use std::time::Duration;

/// Tunables fixed at construction. Not owned by environment variables,
/// files, or flags — the composition root reads those and builds this.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Consecutive failures before an entry is marked *unhealthy*.
    pub failure_threshold: u32,
    /// Cooldown applied when a caller doesn't pass an explicit duration.
    pub default_cooldown: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            default_cooldown: Duration::from_secs(60 * 60),
        }
    }
}
