//! Probe strategies (C4) and the scheduler interface (C7).

pub mod cancellation;
pub mod chat;
pub mod connectivity;
pub mod scheduler;
pub mod strategy;
pub mod types;
pub mod vision;

pub use cancellation::CancellationToken;
pub use chat::ChatProbe;
pub use connectivity::ConnectivityProbe;
pub use scheduler::{DefaultScheduler, ProbeScheduler};
pub use strategy::ProbeStrategy;
pub use types::ProbeOutcome;
pub use vision::VisionProbe;

use crate::core::capability::Capability;
use std::collections::HashMap;
use std::sync::Arc;

/// The default strategy wiring: chat and vision get their dedicated
/// probes, everything else falls back to a plain connectivity check.
pub fn default_strategies() -> HashMap<Capability, Arc<dyn ProbeStrategy>> {
    let connectivity: Arc<dyn ProbeStrategy> = Arc::new(ConnectivityProbe);
    let mut strategies: HashMap<Capability, Arc<dyn ProbeStrategy>> = HashMap::new();
    strategies.insert(Capability::Chat, Arc::new(ChatProbe));
    strategies.insert(Capability::Vision, Arc::new(VisionProbe));
    strategies.insert(Capability::ImageGeneration, connectivity.clone());
    strategies.insert(Capability::ImageEdit, connectivity.clone());
    strategies.insert(Capability::Audio, connectivity);
    strategies
}
