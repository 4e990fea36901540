//! Audio transcription endpoint: multipart upload forwarded to whichever
//! candidate the Failover Driver selects.

use crate::core::capability::Capability;
use crate::core::router::failover::{run, AttemptOutcome, UpstreamFailure};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use tracing::info;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/audio/transcriptions", web::post().to(transcriptions));
}

async fn transcriptions(state: web::Data<AppState>, mut payload: Multipart) -> ActixResult<HttpResponse> {
    info!("audio transcription request");

    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename = "audio.mp3".to_string();

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => return Err(GatewayError::Validation(format!("invalid multipart data: {e}")).into()),
        };

        if field.name() != Some("file") {
            continue;
        }
        if let Some(name) = field.content_disposition().and_then(|cd| cd.get_filename()) {
            filename = name.to_string();
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| GatewayError::Validation(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }
        file_bytes = Some(bytes);
    }

    let Some(file_bytes) = file_bytes else {
        return Err(GatewayError::Validation("multipart body is missing a 'file' field".to_string()).into());
    };

    let provider = state.provider.clone();

    let perform = move |entry: crate::core::router::entry::EntrySnapshot,
                         config: crate::config::models::ProviderConfig|
          -> Pin<Box<dyn Future<Output = AttemptOutcome<Value>> + Send>> {
        let provider = provider.clone();
        let filename = filename.clone();
        let file_bytes = file_bytes.clone();
        Box::pin(async move {
            match provider
                .audio_transcription(&config.base_url, &config.api_key, &entry.model_name, filename, file_bytes)
                .await
            {
                Ok(value) => AttemptOutcome::Success(value),
                Err(UpstreamFailure { status, body }) => {
                    AttemptOutcome::Failure(UpstreamFailure::new(status, body))
                }
            }
        })
    };

    match run(&state.registry, state.directory.as_ref(), Capability::Audio, &perform).await {
        Ok(value) => Ok(HttpResponse::Ok().json(value)),
        Err(err) => Err(GatewayError::from(err).into()),
    }
}
