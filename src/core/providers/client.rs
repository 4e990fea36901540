//! Generic OpenAI-compatible upstream client.
//!
//! This is the one HTTP client the core's `perform` closures are built
//! around. It makes only the two structural assumptions the router
//! contracts on: a chat-completions endpoint accepting `model`/`messages`
//! plus a token cap field, and a `/models` endpoint for liveness. Anything
//! more vendor-specific (multipart audio shaping, image-generation request
//! bodies) lives at the call site, not here — the client stays a thin,
//! swappable transport.

use crate::core::router::failover::UpstreamFailure;
use crate::utils::error::GatewayError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Classifies a transport-level failure the same way the rest of the
/// gateway does (`GatewayError::from(reqwest::Error)`), so a timed-out
/// call is reported with status 408 instead of the generic 0 every other
/// transport error gets.
fn upstream_failure(err: reqwest::Error) -> UpstreamFailure {
    match GatewayError::from(err) {
        GatewayError::Timeout(msg) => UpstreamFailure::new(408, msg),
        other => UpstreamFailure::new(0, other.to_string()),
    }
}

fn completion_cap_field(base_url: &str) -> &'static str {
    if base_url.contains("api.openai.com") {
        "max_completion_tokens"
    } else {
        "max_tokens"
    }
}

/// Thin wrapper over `reqwest::Client` carrying no provider-specific
/// state; one instance is shared across every upstream call.
#[derive(Clone)]
pub struct GenericProvider {
    client: Client,
}

impl GenericProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// POST `{base_url}/chat/completions`. `extra_body` is merged into the
    /// request so callers can add vision content parts, temperature, etc.
    /// without the client knowing about them.
    pub async fn chat_completion(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        messages: Value,
        max_tokens: u32,
    ) -> Result<Value, UpstreamFailure> {
        let base = base_url.trim_end_matches('/');
        let url = format!("{base}/chat/completions");
        let cap_field = completion_cap_field(base);

        let body = serde_json::json!({
            "model": model,
            "messages": messages,
            cap_field: max_tokens,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .timeout(DEFAULT_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(upstream_failure)?;

        self.parse_json_response(response).await
    }

    /// GET `{base_url}/models`, used by request-path liveness checks
    /// outside the probe scheduler (e.g. an admin "test connection" action).
    pub async fn list_models(&self, base_url: &str, api_key: &str) -> Result<Value, UpstreamFailure> {
        let base = base_url.trim_end_matches('/');
        let url = format!("{base}/models");

        let response = self
            .client
            .get(&url)
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(15))
            .send()
            .await
            .map_err(upstream_failure)?;

        self.parse_json_response(response).await
    }

    /// POST a multipart audio file to `{base_url}/audio/transcriptions`.
    /// 120s timeout — real transcription runs well past the probe budget.
    pub async fn audio_transcription(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        filename: String,
        file_bytes: Vec<u8>,
    ) -> Result<Value, UpstreamFailure> {
        let base = base_url.trim_end_matches('/');
        let url = format!("{base}/audio/transcriptions");

        let part = reqwest::multipart::Part::bytes(file_bytes).file_name(filename);
        let form = reqwest::multipart::Form::new()
            .text("model", model.to_string())
            .part("file", part);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(120))
            .multipart(form)
            .send()
            .await
            .map_err(upstream_failure)?;

        self.parse_json_response(response).await
    }

    /// POST an arbitrary JSON body to `{base_url}{path}`, for endpoints
    /// whose shape the core doesn't need to understand (image generation,
    /// audio). `path` must include the leading slash.
    pub async fn post_json(
        &self,
        base_url: &str,
        api_key: &str,
        path: &str,
        body: Value,
    ) -> Result<Value, UpstreamFailure> {
        let base = base_url.trim_end_matches('/');
        let url = format!("{base}{path}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .timeout(DEFAULT_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(upstream_failure)?;

        self.parse_json_response(response).await
    }

    async fn parse_json_response(&self, response: reqwest::Response) -> Result<Value, UpstreamFailure> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<Value>()
                .await
                .map_err(|e| UpstreamFailure::new(status.as_u16(), e.to_string()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(UpstreamFailure::new(status.as_u16(), body))
        }
    }
}
