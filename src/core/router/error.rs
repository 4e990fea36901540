//! Terminal error kinds surfaced by the Failover Driver.

use crate::core::capability::Capability;
use thiserror::Error;

/// Errors the router returns to its caller. Everything else — a single
/// candidate's quota or transient failure — is recovered internally and
/// never reaches this type.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("no providers available for capability {capability}")]
    NoProvidersAvailable { capability: Capability },

    #[error("all providers failed for capability {capability}: {last_error}")]
    AllProvidersFailed {
        capability: Capability,
        last_error: String,
    },

    /// Propagated unchanged from `perform`; never classified as quota or
    /// transient, never mutates registry state.
    #[error("cancelled: {0}")]
    Cancelled(String),
}
