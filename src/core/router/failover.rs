//! Failover Driver (C6): walks Selector candidates until one succeeds.

use super::classifier::{cooldown_for, is_quota};
use super::directory::ProviderDirectory;
use super::entry::EntryKey;
use super::error::RouterError;
use super::registry::HealthRegistry;
use super::selector::candidates;
use crate::config::models::ProviderConfig;
use crate::core::capability::Capability;
use crate::core::router::entry::EntrySnapshot;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Raw upstream failure as reported by `perform`: a status code and body,
/// classification happens centrally in C1, never at the call site.
#[derive(Debug, Clone)]
pub struct UpstreamFailure {
    pub status: u16,
    pub body: String,
}

impl UpstreamFailure {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Outcome of one candidate attempt, as returned by the caller-supplied
/// `perform` strategy.
pub enum AttemptOutcome<T> {
    Success(T),
    Failure(UpstreamFailure),
    /// Propagated unchanged: not classified, no registry mutation.
    Cancelled(String),
}

/// The caller-supplied per-candidate call. A trait rather than a bare
/// closure so it can carry its own HTTP client and request payload.
#[async_trait]
pub trait Perform<T>: Send + Sync {
    async fn call(&self, entry: &EntrySnapshot, provider: &ProviderConfig) -> AttemptOutcome<T>;
}

#[async_trait]
impl<T, F, Fut> Perform<T> for F
where
    F: Fn(EntrySnapshot, ProviderConfig) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = AttemptOutcome<T>> + Send,
    T: Send,
{
    async fn call(&self, entry: &EntrySnapshot, provider: &ProviderConfig) -> AttemptOutcome<T> {
        (self)(entry.clone(), provider.clone()).await
    }
}

/// Run one capability request to completion: iterate candidates in
/// priority order, invoking `perform` on each until one succeeds or the
/// list is exhausted.
pub async fn run<T>(
    registry: &HealthRegistry,
    directory: &dyn ProviderDirectory,
    capability: Capability,
    perform: &dyn Perform<T>,
) -> Result<T, RouterError> {
    let pool = candidates(registry, capability);
    if pool.is_empty() {
        return Err(RouterError::NoProvidersAvailable { capability });
    }

    let mut last_error: Option<UpstreamFailure> = None;

    for entry in pool {
        let key = EntryKey::new(entry.capability, entry.provider_id, entry.model_name.clone());

        // The candidate list is a snapshot; a parallel request may have
        // opened a cooldown on this same entry since it was taken.
        if registry.in_cooldown(&key) {
            continue;
        }

        let Some(provider) = directory.get(entry.provider_id).await else {
            debug!(provider_id = entry.provider_id, "provider lookup failed, skipping candidate");
            continue;
        };
        if !provider.enabled {
            debug!(provider_id = entry.provider_id, "provider disabled, skipping candidate");
            continue;
        }

        match perform.call(&entry, &provider).await {
            AttemptOutcome::Success(value) => {
                registry.mark_healthy(&key);
                info!(
                    capability = %capability,
                    provider = %entry.provider_name,
                    model = %entry.model_name,
                    "candidate succeeded"
                );
                return Ok(value);
            }
            AttemptOutcome::Cancelled(reason) => {
                return Err(RouterError::Cancelled(reason));
            }
            AttemptOutcome::Failure(failure) => {
                if is_quota(failure.status, &failure.body) {
                    let cooldown = cooldown_for(failure.status, &failure.body);
                    warn!(
                        capability = %capability,
                        provider = %entry.provider_name,
                        model = %entry.model_name,
                        status = failure.status,
                        cooldown_secs = cooldown.as_secs(),
                        "candidate hit quota, opening cooldown"
                    );
                    registry.set_cooldown(&key, cooldown.as_millis() as u64, &failure.body);
                } else {
                    warn!(
                        capability = %capability,
                        provider = %entry.provider_name,
                        model = %entry.model_name,
                        status = failure.status,
                        "candidate failed, marking unhealthy"
                    );
                    registry.mark_unhealthy(&key, &failure.body, failure.status);
                }
                last_error = Some(failure);
            }
        }
    }

    let last_error = last_error
        .map(|f| format!("status={} body={}", f.status, f.body))
        .unwrap_or_else(|| "no candidate was attempted".to_string());

    Err(RouterError::AllProvidersFailed {
        capability,
        last_error,
    })
}
