//! Connectivity probe for capabilities where spending real model credits
//! on liveness isn't worth it: image generation and audio.

use super::strategy::ProbeStrategy;
use super::types::{trimmed_base_url, ProbeOutcome};
use crate::config::models::ProviderConfig;
use crate::core::router::entry::EntrySnapshot;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

pub struct ConnectivityProbe;

#[async_trait]
impl ProbeStrategy for ConnectivityProbe {
    async fn probe(&self, _entry: &EntrySnapshot, provider: &ProviderConfig, client: &Client) -> ProbeOutcome {
        let base = trimmed_base_url(&provider.base_url);
        let url = format!("{base}/models");

        let started = Instant::now();
        let result = client
            .get(&url)
            .bearer_auth(&provider.api_key)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                let status = response.status();
                if status == StatusCode::UNAUTHORIZED {
                    ProbeOutcome::failure(latency_ms, status.as_u16(), "authentication failed")
                } else if status == StatusCode::TOO_MANY_REQUESTS {
                    let body = response.text().await.unwrap_or_default();
                    ProbeOutcome::failure(latency_ms, status.as_u16(), body)
                } else if status.as_u16() < 500 {
                    ProbeOutcome::success(latency_ms)
                } else {
                    let body = response.text().await.unwrap_or_default();
                    ProbeOutcome::failure(latency_ms, status.as_u16(), body)
                }
            }
            Err(err) => ProbeOutcome::from_reqwest_error(latency_ms, err),
        }
    }
}
