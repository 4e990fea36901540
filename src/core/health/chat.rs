//! Chat probe: one-token round trip against `/chat/completions`.

use super::strategy::ProbeStrategy;
use super::types::{trimmed_base_url, ProbeOutcome};
use crate::config::models::ProviderConfig;
use crate::core::router::entry::EntrySnapshot;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::{Duration, Instant};

const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI's own endpoint renamed the legacy `max_tokens` field; every
/// OpenAI-compatible third party still accepts the old name.
fn completion_cap_field(base_url: &str) -> &'static str {
    if base_url.contains("api.openai.com") {
        "max_completion_tokens"
    } else {
        "max_tokens"
    }
}

pub struct ChatProbe;

#[async_trait]
impl ProbeStrategy for ChatProbe {
    async fn probe(&self, entry: &EntrySnapshot, provider: &ProviderConfig, client: &Client) -> ProbeOutcome {
        let base = trimmed_base_url(&provider.base_url);
        let url = format!("{base}/chat/completions");
        let cap_field = completion_cap_field(base);

        let body = json!({
            "model": entry.model_name,
            "messages": [{"role": "user", "content": "hi"}],
            cap_field: 1,
        });

        let started = Instant::now();
        let result = client
            .post(&url)
            .bearer_auth(&provider.api_key)
            .timeout(PROBE_TIMEOUT)
            .json(&body)
            .send()
            .await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) if response.status().is_success() => ProbeOutcome::success(latency_ms),
            Ok(response) => {
                let status = response.status().as_u16();
                let text = response.text().await.unwrap_or_default();
                ProbeOutcome::failure(latency_ms, status, text)
            }
            Err(err) => ProbeOutcome::from_reqwest_error(latency_ms, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_host_uses_max_completion_tokens() {
        assert_eq!(
            completion_cap_field("https://api.openai.com/v1"),
            "max_completion_tokens"
        );
        assert_eq!(completion_cap_field("https://api.acme.example/v1"), "max_tokens");
    }
}
