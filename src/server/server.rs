//! HTTP server core: wires `AppState` into an actix-web application.

use crate::config::{Config, ServerConfig};
use crate::core::providers::GenericProvider;
use crate::core::Gateway;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{middleware::DefaultHeaders, web, App, HttpServer as ActixHttpServer};
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
    gateway: Gateway,
}

impl HttpServer {
    pub async fn new(config: &Config) -> Result<Self> {
        info!("creating http server");

        let gateway = Gateway::new(config).await?;
        let client = crate::utils::net::build_client(Duration::from_secs(60))?;
        let provider = GenericProvider::new(client);

        let state = AppState::new(
            std::sync::Arc::new(config.clone()),
            gateway.registry.clone(),
            gateway.directory.clone(),
            provider,
        );

        Ok(Self {
            config: config.gateway.server.clone(),
            state,
            gateway,
        })
    }

    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        info!("setting up routes and middleware");

        App::new()
            .app_data(state)
            .wrap(crate::server::middleware::RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "provider-gateway")))
            .configure(routes::health::configure_routes)
            .configure(routes::ai::configure_routes)
    }

    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        info!(address = %bind_addr, "starting http server");

        let scheduler_handle = self.gateway.spawn_scheduler();
        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(self.config.workers)
            .bind(&bind_addr)
            .map_err(|e| GatewayError::Internal(format!("failed to bind {bind_addr}: {e}")))?
            .run();

        info!(address = %bind_addr, "http server listening");
        server
            .await
            .map_err(|e| GatewayError::Internal(format!("server error: {e}")))?;

        self.gateway.shutdown();
        scheduler_handle.abort();

        info!("http server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
