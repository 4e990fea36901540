//! Liveness and per-capability health summary endpoints.

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
struct Liveness {
    status: &'static str,
    version: &'static str,
    git_hash: &'static str,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(liveness))
        .route("/v1/health", web::get().to(capability_summary));
}

/// Plain liveness check for load balancers — doesn't touch the registry.
async fn liveness() -> ActixResult<HttpResponse> {
    let info = crate::build_info();
    Ok(HttpResponse::Ok().json(ApiResponse::success(Liveness {
        status: "ok",
        version: info.version,
        git_hash: info.git_hash,
    })))
}

/// Per-capability state counts, for operators (C8).
async fn capability_summary(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("capability summary requested");
    let summary = crate::core::router::summary::summarize(&state.registry);
    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}
