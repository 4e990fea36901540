//! Summary Reporter (C8): per-state counts per capability, for operators.

use super::registry::{HealthRegistry, StateCounts};
use crate::core::capability::Capability;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize)]
pub struct GatewaySummary {
    pub capabilities: HashMap<Capability, StateCounts>,
}

/// Derive counts per state per capability. Thin wrapper over the
/// registry's own summary methods — kept as its own module because the
/// reporter is a named component, not an implementation detail of C3.
pub fn summarize(registry: &HealthRegistry) -> GatewaySummary {
    GatewaySummary {
        capabilities: registry.summary_all(),
    }
}

pub fn summarize_capability(registry: &HealthRegistry, capability: Capability) -> StateCounts {
    registry.summary(capability)
}
