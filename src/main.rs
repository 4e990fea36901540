//! provider-gateway - health-aware AI provider gateway
//!
//! Binary entry point: initializes logging then hands off to
//! `server::run_server`, which loads configuration and runs the actix-web
//! application to completion.

use provider_gateway::server;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    provider_gateway::utils::logging::init();

    match server::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
