//! Vision completions endpoint: identical wire shape to chat, but routed
//! against the vision candidate pool (separate registry entries, separate
//! probe strategy).

use crate::core::capability::Capability;
use crate::core::models::openai::ChatCompletionRequest;
use crate::core::router::failover::{run, AttemptOutcome, UpstreamFailure};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use tracing::info;

const DEFAULT_MAX_TOKENS: u32 = 512;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/vision/completions", web::post().to(vision_completions));
}

async fn vision_completions(
    state: web::Data<AppState>,
    body: web::Json<ChatCompletionRequest>,
) -> ActixResult<HttpResponse> {
    let request = body.into_inner();
    info!("vision completion request");

    let provider = state.provider.clone();
    let max_tokens = request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
    let messages = serde_json::to_value(&request.messages).map_err(GatewayError::Serialization)?;

    let perform = move |entry: crate::core::router::entry::EntrySnapshot,
                         config: crate::config::models::ProviderConfig|
          -> Pin<Box<dyn Future<Output = AttemptOutcome<Value>> + Send>> {
        let provider = provider.clone();
        let messages = messages.clone();
        Box::pin(async move {
            match provider
                .chat_completion(&config.base_url, &config.api_key, &entry.model_name, messages, max_tokens)
                .await
            {
                Ok(value) => AttemptOutcome::Success(value),
                Err(UpstreamFailure { status, body }) => {
                    AttemptOutcome::Failure(UpstreamFailure::new(status, body))
                }
            }
        })
    };

    match run(&state.registry, state.directory.as_ref(), Capability::Vision, &perform).await {
        Ok(value) => Ok(HttpResponse::Ok().json(value)),
        Err(err) => Err(GatewayError::from(err).into()),
    }
}
