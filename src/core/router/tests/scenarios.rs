//! End-to-end scenarios for the Failover Driver.

use crate::config::models::ProviderConfig;
use crate::core::capability::Capability;
use crate::core::router::config::RouterConfig;
use crate::core::router::directory::{CachedProviderDirectory, ProviderDirectory};
use crate::core::router::entry::{EntryKey, HealthState};
use crate::core::router::failover::{run, AttemptOutcome};
use crate::core::router::registry::HealthRegistry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn provider(id: i64) -> ProviderConfig {
    ProviderConfig {
        id,
        name: format!("provider-{id}"),
        base_url: "https://api.example.com".to_string(),
        api_key: "sk-test".to_string(),
        enabled: true,
    }
}

/// Scripted per-provider outcome, keyed by provider id, plus a call log so
/// tests can assert which candidates were actually attempted.
fn scripted(
    outcomes: HashMap<i64, AttemptOutcome<&'static str>>,
    log: Arc<Mutex<Vec<i64>>>,
) -> impl Fn(
    crate::core::router::entry::EntrySnapshot,
    ProviderConfig,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = AttemptOutcome<&'static str>> + Send>> {
    let outcomes = Arc::new(Mutex::new(outcomes));
    move |entry, _provider| {
        let outcomes = outcomes.clone();
        let log = log.clone();
        Box::pin(async move {
            log.lock().unwrap().push(entry.provider_id);
            match outcomes.lock().unwrap().remove(&entry.provider_id) {
                Some(outcome) => outcome,
                None => AttemptOutcome::Failure(crate::core::router::failover::UpstreamFailure::new(
                    500,
                    "unscripted candidate",
                )),
            }
        })
    }
}

fn registry() -> HealthRegistry {
    HealthRegistry::new(RouterConfig {
        failure_threshold: 3,
        default_cooldown: Duration::from_secs(3600),
    })
}

#[tokio::test]
async fn single_candidate_success() {
    let reg = registry();
    reg.register(Capability::Chat, 1, "acme", "gpt", 10);
    let directory = CachedProviderDirectory::new(vec![provider(1)]).await;

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut outcomes = HashMap::new();
    outcomes.insert(1, AttemptOutcome::Success("ok"));
    let perform = scripted(outcomes, log.clone());

    let result = run(&reg, &directory, Capability::Chat, &perform).await.unwrap();
    assert_eq!(result, "ok");

    let key = EntryKey::new(Capability::Chat, 1, "gpt");
    let snap = reg.list_all(Capability::Chat).into_iter().next().unwrap();
    assert!(matches!(snap.state, HealthState::Healthy));
    assert_eq!(snap.failure_count, 0);
    assert!(!reg.in_cooldown(&key));
}

#[tokio::test]
async fn failover_on_transient() {
    let reg = registry();
    reg.register(Capability::Vision, 1, "acme", "a", 10);
    reg.register(Capability::Vision, 2, "acme", "b", 5);
    let directory = CachedProviderDirectory::new(vec![provider(1), provider(2)]).await;

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut outcomes = HashMap::new();
    outcomes.insert(
        1,
        AttemptOutcome::Failure(crate::core::router::failover::UpstreamFailure::new(
            500,
            "server error",
        )),
    );
    outcomes.insert(2, AttemptOutcome::Success("from-b"));
    let perform = scripted(outcomes, log.clone());

    let result = run(&reg, &directory, Capability::Vision, &perform).await.unwrap();
    assert_eq!(result, "from-b");
    assert_eq!(*log.lock().unwrap(), vec![1, 2]);

    let snaps = reg.list_all(Capability::Vision);
    let a = snaps.iter().find(|s| s.model_name == "a").unwrap();
    let b = snaps.iter().find(|s| s.model_name == "b").unwrap();
    assert_eq!(a.failure_count, 1);
    assert!(matches!(a.state, HealthState::Unknown));
    assert!(matches!(b.state, HealthState::Healthy));
}

#[tokio::test]
async fn quota_error_opens_short_cooldown() {
    let reg = registry();
    reg.register(Capability::Chat, 1, "acme", "gpt", 10);
    let directory = CachedProviderDirectory::new(vec![provider(1)]).await;

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut outcomes = HashMap::new();
    outcomes.insert(
        1,
        AttemptOutcome::Failure(crate::core::router::failover::UpstreamFailure::new(
            429,
            "rate limit exceeded",
        )),
    );
    let perform = scripted(outcomes, log.clone());

    let err = run(&reg, &directory, Capability::Chat, &perform).await.unwrap_err();
    assert!(matches!(
        err,
        crate::core::router::error::RouterError::AllProvidersFailed { .. }
    ));

    let key = EntryKey::new(Capability::Chat, 1, "gpt");
    assert!(reg.in_cooldown(&key));
}

#[tokio::test]
async fn daily_quota_opens_24h_cooldown() {
    let reg = registry();
    reg.register(Capability::Chat, 1, "acme", "gpt", 10);
    let directory = CachedProviderDirectory::new(vec![provider(1)]).await;

    let mut outcomes = HashMap::new();
    outcomes.insert(
        1,
        AttemptOutcome::Failure(crate::core::router::failover::UpstreamFailure::new(
            200,
            "daily limit reached, check billing",
        )),
    );
    let perform = scripted(outcomes, Arc::new(Mutex::new(Vec::new())));

    run(&reg, &directory, Capability::Chat, &perform).await.unwrap_err();

    let snap = reg.list_all(Capability::Chat).into_iter().next().unwrap();
    let remaining = snap.cooldown_until_ms;
    assert!(remaining > 0);
    // 24h in ms, allow scheduling jitter.
    assert!(remaining >= crate::core::router::entry::now_millis() + 23 * 60 * 60 * 1000);
}

#[tokio::test]
async fn priority_then_recency_tiebreak() {
    let reg = registry();
    reg.register(Capability::Chat, 1, "acme", "a", 7);
    reg.register(Capability::Chat, 2, "acme", "b", 7);
    reg.mark_healthy(&EntryKey::new(Capability::Chat, 1, "a"));
    std::thread::sleep(Duration::from_millis(5));
    reg.mark_healthy(&EntryKey::new(Capability::Chat, 2, "b"));

    let cands = crate::core::router::selector::candidates(&reg, Capability::Chat);
    assert_eq!(cands[0].model_name, "b");
    assert_eq!(cands[1].model_name, "a");

    reg.mark_healthy(&EntryKey::new(Capability::Chat, 2, "b"));
    let cands = crate::core::router::selector::candidates(&reg, Capability::Chat);
    assert_eq!(cands[0].model_name, "b");
    assert_eq!(cands[1].model_name, "a");
}

#[tokio::test]
async fn cooldown_auto_expires_without_a_write() {
    let reg = registry();
    reg.register(Capability::Chat, 1, "acme", "gpt", 10);
    let key = EntryKey::new(Capability::Chat, 1, "gpt");
    reg.set_cooldown(&key, 10, "rate limit");

    tokio::time::sleep(Duration::from_millis(25)).await;

    let cands = crate::core::router::selector::candidates(&reg, Capability::Chat);
    assert_eq!(cands.len(), 1);

    let counts = reg.summary(Capability::Chat);
    assert_eq!(counts.unknown, 1);
    assert_eq!(counts.cooldown, 0);
}

#[tokio::test]
async fn is_healthy_false_during_active_cooldown() {
    let reg = registry();
    reg.register(Capability::Chat, 1, "acme", "gpt", 10);
    let key = EntryKey::new(Capability::Chat, 1, "gpt");
    reg.set_cooldown(&key, 60_000, "rate limit");

    assert!(!reg.is_healthy(&key));
    assert!(reg.in_cooldown(&key));
}

#[tokio::test]
async fn no_providers_available_when_registry_empty() {
    let reg = registry();
    let directory = CachedProviderDirectory::new(vec![]).await;
    let perform = scripted(HashMap::new(), Arc::new(Mutex::new(Vec::new())));

    let err = run(&reg, &directory, Capability::Audio, &perform).await.unwrap_err();
    assert!(matches!(
        err,
        crate::core::router::error::RouterError::NoProvidersAvailable { .. }
    ));
}

#[tokio::test]
async fn disabled_provider_is_skipped() {
    let reg = registry();
    reg.register(Capability::Chat, 1, "acme", "gpt", 10);
    let mut disabled = provider(1);
    disabled.enabled = false;
    let directory = CachedProviderDirectory::new(vec![disabled]).await;
    let perform = scripted(HashMap::new(), Arc::new(Mutex::new(Vec::new())));

    let err = run(&reg, &directory, Capability::Chat, &perform).await.unwrap_err();
    assert!(matches!(
        err,
        crate::core::router::error::RouterError::AllProvidersFailed { .. }
    ));
}
