//! Image generation endpoint. The request body is forwarded to the
//! upstream unchanged — shaping an OpenAI-compatible image payload is
//! outside the router's concern.

use crate::core::capability::Capability;
use crate::core::router::failover::{run, AttemptOutcome, UpstreamFailure};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use tracing::info;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/images/generations", web::post().to(image_generations))
        .route("/v1/images/edits", web::post().to(image_edits));
}

async fn image_generations(state: web::Data<AppState>, body: web::Json<Value>) -> ActixResult<HttpResponse> {
    info!("image generation request");
    route_image_request(state, body.into_inner(), Capability::ImageGeneration, "/images/generations").await
}

async fn image_edits(state: web::Data<AppState>, body: web::Json<Value>) -> ActixResult<HttpResponse> {
    info!("image edit request");
    route_image_request(state, body.into_inner(), Capability::ImageEdit, "/images/edits").await
}

/// Shared by generation and edit: both forward an arbitrary JSON body to a
/// fixed upstream path, injecting `model` from the selected candidate.
async fn route_image_request(
    state: web::Data<AppState>,
    request_body: Value,
    capability: Capability,
    upstream_path: &'static str,
) -> ActixResult<HttpResponse> {
    let provider = state.provider.clone();

    let perform = move |entry: crate::core::router::entry::EntrySnapshot,
                         config: crate::config::models::ProviderConfig|
          -> Pin<Box<dyn Future<Output = AttemptOutcome<Value>> + Send>> {
        let provider = provider.clone();
        let mut request_body = request_body.clone();
        Box::pin(async move {
            if let Some(obj) = request_body.as_object_mut() {
                obj.entry("model").or_insert_with(|| entry.model_name.clone().into());
            }
            match provider
                .post_json(&config.base_url, &config.api_key, upstream_path, request_body)
                .await
            {
                Ok(value) => AttemptOutcome::Success(value),
                Err(UpstreamFailure { status, body }) => {
                    AttemptOutcome::Failure(UpstreamFailure::new(status, body))
                }
            }
        })
    };

    match run(&state.registry, state.directory.as_ref(), capability, &perform).await {
        Ok(value) => Ok(HttpResponse::Ok().json(value)),
        Err(err) => Err(GatewayError::from(err).into()),
    }
}
