//! Vision probe: same endpoint as chat, with an image part attached.

use super::strategy::ProbeStrategy;
use super::types::{trimmed_base_url, ProbeOutcome};
use crate::config::models::ProviderConfig;
use crate::core::router::entry::EntrySnapshot;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde_json::json;
use std::time::{Duration, Instant};

const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// A single opaque black pixel, 1x1, PNG-encoded — the smallest image that
/// still round-trips through every vision-capable upstream we target.
const ONE_PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x62, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

fn one_pixel_data_url() -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(ONE_PIXEL_PNG))
}

fn completion_cap_field(base_url: &str) -> &'static str {
    if base_url.contains("api.openai.com") {
        "max_completion_tokens"
    } else {
        "max_tokens"
    }
}

pub struct VisionProbe;

#[async_trait]
impl ProbeStrategy for VisionProbe {
    async fn probe(&self, entry: &EntrySnapshot, provider: &ProviderConfig, client: &Client) -> ProbeOutcome {
        let base = trimmed_base_url(&provider.base_url);
        let url = format!("{base}/chat/completions");
        let cap_field = completion_cap_field(base);

        let body = json!({
            "model": entry.model_name,
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": "hi"},
                    {"type": "image_url", "image_url": {"url": one_pixel_data_url()}},
                ],
            }],
            cap_field: 10,
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
    fn data_url_is_well_formed() {
        let url = one_pixel_data_url();
        assert!(url.starts_with("data:image/png;base64,"));
    }
}
