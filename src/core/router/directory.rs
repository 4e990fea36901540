//! Provider Directory (C2): read-mostly id → config lookup.
//!
//! Modeled as an interface with one method, per the design notes — the
//! core depends on the trait, the composition root wires it to whatever
//! backs the real provider rows (here, a `moka` cache in front of the
//! config-loaded list; in a fuller deployment, a database-backed loader).

use crate::config::models::ProviderConfig;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

#[async_trait]
pub trait ProviderDirectory: Send + Sync {
    /// Look up a provider by id. `None` on unknown id — callers treat this
    /// the same as a disabled provider: skip the candidate, no state
    /// mutation.
    async fn get(&self, id: i64) -> Option<ProviderConfig>;
}

/// `moka`-cached directory over a fixed, admin-loaded provider list.
///
/// The cache exists to keep `get` non-blocking and allocation-light on the
/// request hot path; it is refreshed wholesale on `reload`, which is the
/// only mutation path and happens outside the core (admin action).
pub struct CachedProviderDirectory {
    cache: Cache<i64, Arc<ProviderConfig>>,
}

impl CachedProviderDirectory {
    pub async fn new(providers: Vec<ProviderConfig>) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(300))
            .max_capacity(10_000)
            .build();
        let directory = Self { cache };
        directory.reload(providers).await;
        directory
    }

    /// Replace the whole directory with a freshly loaded provider list.
    pub async fn reload(&self, providers: Vec<ProviderConfig>) {
        self.cache.invalidate_all();
        for provider in providers {
            self.cache.insert(provider.id, Arc::new(provider)).await;
        }
    }
}

#[async_trait]
impl ProviderDirectory for CachedProviderDirectory {
    async fn get(&self, id: i64) -> Option<ProviderConfig> {
        self.cache.get(&id).await.map(|p| (*p).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(id: i64, enabled: bool) -> ProviderConfig {
        ProviderConfig {
            id,
            name: format!("provider-{id}"),
            base_url: "https://api.example.com".to_string(),
            api_key: "sk-test".to_string(),
            enabled,
        }
    }

    #[tokio::test]
    async fn get_returns_loaded_provider() {
        let dir = CachedProviderDirectory::new(vec![provider(1, true)]).await;
        let config = dir.get(1).await.unwrap();
        assert_eq!(config.name, "provider-1");
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_id() {
        let dir = CachedProviderDirectory::new(vec![provider(1, true)]).await;
        assert!(dir.get(99).await.is_none());
    }

    #[tokio::test]
    async fn reload_replaces_contents() {
        let dir = CachedProviderDirectory::new(vec![provider(1, true)]).await;
        dir.reload(vec![provider(2, true)]).await;
        assert!(dir.get(1).await.is_none());
        assert!(dir.get(2).await.is_some());
    }
}
