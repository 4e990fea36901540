//! Shared types for probe strategies (C4) and the scheduler (C7).

use crate::core::router::failover::UpstreamFailure;
use crate::utils::error::GatewayError;

/// Outcome of one probe: latency measured from just before the HTTP send
/// to just after headers return, or a classifiable failure.
pub struct ProbeOutcome {
    pub latency_ms: u64,
    pub error: Option<UpstreamFailure>,
}

impl ProbeOutcome {
    pub fn success(latency_ms: u64) -> Self {
        Self {
            latency_ms,
            error: None,
        }
    }

    pub fn failure(latency_ms: u64, status: u16, body: impl Into<String>) -> Self {
        Self {
            latency_ms,
            error: Some(UpstreamFailure::new(status, body)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Build a failure outcome from a transport-level `reqwest::Error`,
    /// giving a timed-out probe its own status (408) instead of the
    /// generic 0 every other transport error gets.
    pub fn from_reqwest_error(latency_ms: u64, err: reqwest::Error) -> Self {
        match GatewayError::from(err) {
            GatewayError::Timeout(msg) => Self::failure(latency_ms, 408, msg),
            other => Self::failure(latency_ms, 0, other.to_string()),
        }
    }
}

/// Trim a trailing slash so strategies can uniformly append `/chat/completions`.
pub fn trimmed_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}
