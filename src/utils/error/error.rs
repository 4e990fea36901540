//! Error types for the Gateway
//!
//! This module defines all error types used throughout the gateway.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the Gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client errors other than a timeout
    #[error("http client error: {0}")]
    HttpClient(reqwest::Error),

    /// A per-call upstream timeout elapsed (chat/vision, connectivity, audio)
    #[error("timeout: {0}")]
    Timeout(String),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("validation error: {0}")]
    Validation(String),

    /// A named resource was not found
    #[error("not found: {0}")]
    NotFound(String),

    /// A provider id did not resolve to a registered config, or is disabled
    #[error("provider misconfigured: {0}")]
    ProviderMisconfigured(String),

    /// No candidate (provider, model) pairs exist for a capability
    #[error("no providers available for capability: {0}")]
    NoProvidersAvailable(String),

    /// Every candidate for a capability failed
    #[error("all providers failed for capability {capability}: {last_error}")]
    AllProvidersFailed {
        /// Capability that was being routed
        capability: String,
        /// The final upstream error encountered
        last_error: String,
    },

    /// The caller's context was cancelled mid-request
    #[error("request cancelled: {0}")]
    Cancelled(String),

    /// Catch-all for unexpected internal failures
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        let (status, message) = match self {
            GatewayError::Validation(msg) => (actix_web::http::StatusCode::BAD_REQUEST, msg.clone()),
            GatewayError::NotFound(msg) => (actix_web::http::StatusCode::NOT_FOUND, msg.clone()),
            GatewayError::NoProvidersAvailable(capability) => (
                actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
                format!("no providers available for {capability}"),
            ),
            GatewayError::AllProvidersFailed { capability, last_error } => (
                actix_web::http::StatusCode::BAD_GATEWAY,
                format!("all providers failed for {capability}: {last_error}"),
            ),
            GatewayError::Cancelled(msg) => (actix_web::http::StatusCode::REQUEST_TIMEOUT, msg.clone()),
            GatewayError::Timeout(msg) => (actix_web::http::StatusCode::GATEWAY_TIMEOUT, msg.clone()),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": {
                "message": message,
                "type": self.error_type(),
            }
        }))
    }
}

/// Mirrors the teacher's `is_timeout()` split between a timeout and a
/// plain transport/network error.
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout(err.to_string())
        } else {
            GatewayError::HttpClient(err)
        }
    }
}

impl From<crate::core::router::RouterError> for GatewayError {
    fn from(err: crate::core::router::RouterError) -> Self {
        use crate::core::router::RouterError;
        match err {
            RouterError::NoProvidersAvailable { capability } => {
                GatewayError::NoProvidersAvailable(capability.to_string())
            }
            RouterError::AllProvidersFailed { capability, last_error } => {
                GatewayError::AllProvidersFailed {
                    capability: capability.to_string(),
                    last_error,
                }
            }
            RouterError::Cancelled(reason) => GatewayError::Cancelled(reason),
        }
    }
}

impl GatewayError {
    fn error_type(&self) -> &'static str {
        match self {
            GatewayError::Config(_) => "config_error",
            GatewayError::HttpClient(_) => "http_client_error",
            GatewayError::Timeout(_) => "timeout_error",
            GatewayError::Serialization(_) | GatewayError::Yaml(_) => "serialization_error",
            GatewayError::Io(_) => "io_error",
            GatewayError::Validation(_) => "invalid_request_error",
            GatewayError::NotFound(_) => "not_found_error",
            GatewayError::ProviderMisconfigured(_) => "provider_misconfigured",
            GatewayError::NoProvidersAvailable(_) => "no_providers_available",
            GatewayError::AllProvidersFailed { .. } => "all_providers_failed",
            GatewayError::Cancelled(_) => "cancelled",
            GatewayError::Internal(_) => "internal_error",
        }
    }
}
