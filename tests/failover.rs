//! End-to-end failover test: two fake upstreams behind `wiremock`, one
//! failing with a rate-limit error and one healthy, routed through the
//! same failover driver the HTTP handlers use.

use provider_gateway::config::ProviderConfig;
use provider_gateway::core::providers::GenericProvider;
use provider_gateway::core::router::{
    self, AttemptOutcome, CachedProviderDirectory, EntryKey, EntrySnapshot, HealthRegistry,
    RouterConfig,
};
use provider_gateway::core::Capability;
use serde_json::{json, Value};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_config(id: i64, base_url: &str) -> ProviderConfig {
    ProviderConfig {
        id,
        name: format!("provider-{id}"),
        base_url: base_url.to_string(),
        api_key: "sk-test".to_string(),
        enabled: true,
    }
}

/// Builds a `Perform<Value>` closure around a real `GenericProvider`, the
/// same shape `server::routes::ai::chat` hands to the failover driver.
fn chat_perform(
    client: GenericProvider,
) -> impl Fn(EntrySnapshot, ProviderConfig) -> Pin<Box<dyn std::future::Future<Output = AttemptOutcome<Value>> + Send>>
{
    move |_entry, cfg| {
        let client = client.clone();
        Box::pin(async move {
            match client
                .chat_completion(&cfg.base_url, &cfg.api_key, "gpt-test", json!([]), 1)
                .await
            {
                Ok(body) => AttemptOutcome::Success(body),
                Err(failure) => AttemptOutcome::Failure(failure),
            }
        })
    }
}

#[tokio::test]
async fn failover_moves_to_the_healthy_upstream_after_a_429() {
    let flaky = MockServer::start().await;
    let healthy = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({"error": {"message": "rate limit exceeded, please slow down"}})),
        )
        .mount(&flaky)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [{"message": {"role": "assistant", "content": "hi"}}]
        })))
        .mount(&healthy)
        .await;

    let providers = vec![
        provider_config(1, &flaky.uri()),
        provider_config(2, &healthy.uri()),
    ];

    let registry = HealthRegistry::new(RouterConfig::default());
    registry.register(Capability::Chat, 1, "provider-1", "gpt-test", 10);
    registry.register(Capability::Chat, 2, "provider-2", "gpt-test", 5);

    let directory = CachedProviderDirectory::new(providers).await;
    let client = provider_gateway::utils::net::build_client(Duration::from_secs(5)).unwrap();
    let perform = chat_perform(GenericProvider::new(client));

    let result = router::failover::run(&registry, &directory, Capability::Chat, &perform)
        .await
        .expect("one candidate should succeed");

    assert_eq!(result["id"], "chatcmpl-1");
    assert!(
        registry.in_cooldown(&EntryKey::new(Capability::Chat, 1, "gpt-test")),
        "the rate-limited candidate should be in cooldown"
    );
    assert!(
        registry.is_healthy(&EntryKey::new(Capability::Chat, 2, "gpt-test")),
        "the candidate that answered should stay healthy"
    );
}

#[tokio::test]
async fn all_candidates_failing_surfaces_the_last_error() {
    let down = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&down)
        .await;

    let providers = vec![provider_config(1, &down.uri())];
    let registry = HealthRegistry::new(RouterConfig {
        failure_threshold: 1,
        ..RouterConfig::default()
    });
    registry.register(Capability::Chat, 1, "provider-1", "gpt-test", 0);

    let directory = CachedProviderDirectory::new(providers).await;
    let client = provider_gateway::utils::net::build_client(Duration::from_secs(5)).unwrap();
    let perform = chat_perform(GenericProvider::new(client));

    let err = router::failover::run(&registry, &directory, Capability::Chat, &perform)
        .await
        .unwrap_err();

    match err {
        router::RouterError::AllProvidersFailed { last_error, .. } => {
            assert!(last_error.contains("internal error") || last_error.contains("500"));
        }
        other => panic!("expected AllProvidersFailed, got {other:?}"),
    }
    assert!(!registry.is_healthy(&EntryKey::new(Capability::Chat, 1, "gpt-test")));
}

#[tokio::test]
async fn concurrent_requests_share_one_cooldown() {
    let flaky = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("too many requests"))
        .mount(&flaky)
        .await;

    let providers = vec![provider_config(1, &flaky.uri())];
    let registry = Arc::new(HealthRegistry::new(RouterConfig::default()));
    registry.register(Capability::Chat, 1, "provider-1", "gpt-test", 0);

    let directory = Arc::new(CachedProviderDirectory::new(providers).await);
    let client = provider_gateway::utils::net::build_client(Duration::from_secs(5)).unwrap();
    let perform = Arc::new(chat_perform(GenericProvider::new(client)));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let registry = registry.clone();
        let directory = directory.clone();
        let perform = perform.clone();
        handles.push(tokio::spawn(async move {
            router::failover::run(&registry, directory.as_ref(), Capability::Chat, perform.as_ref()).await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_err());
    }

    assert!(registry.in_cooldown(&EntryKey::new(Capability::Chat, 1, "gpt-test")));
}
