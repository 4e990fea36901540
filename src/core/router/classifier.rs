//! Error Classifier (C1): pure functions, no state.
//!
//! Every upstream failure the router sees passes through here exactly once,
//! at the point the Failover Driver decides between a cooldown and a plain
//! unhealthy strike.

use std::time::Duration;

const QUOTA_TOKENS: &[&str] = &[
    "quota exceeded",
    "rate limit",
    "rate_limit_exceeded",
    "quota_exceeded",
    "too many requests",
    "request limit",
    "tokens per minute",
    "requests per minute",
    "daily limit",
    "insufficient_quota",
    "billing",
];

const TOO_MANY_REQUESTS: u16 = 429;

/// True when `status`/`body` indicate a rate-limit, billing, or quota error.
///
/// Matching on the body is substring, case-insensitive.
pub fn is_quota(status: u16, body: &str) -> bool {
    if status == TOO_MANY_REQUESTS {
        return true;
    }
    let lower = body.to_lowercase();
    QUOTA_TOKENS.iter().any(|token| lower.contains(token))
}

/// Tiered cooldown duration for a classified quota error.
///
/// Daily/billing signals reset on a day boundary and get the longest
/// cooldown; per-minute signals get a short window; anything else gets a
/// conservative default.
pub fn cooldown_for(status: u16, body: &str) -> Duration {
    let lower = body.to_lowercase();
    if lower.contains("daily limit") || lower.contains("billing") || lower.contains("insufficient_quota")
    {
        Duration::from_secs(24 * 60 * 60)
    } else if status == TOO_MANY_REQUESTS
        || lower.contains("tokens per minute")
        || lower.contains("requests per minute")
    {
        Duration::from_secs(5 * 60)
    } else {
        Duration::from_secs(60 * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_by_status() {
        assert!(is_quota(429, ""));
        assert!(!is_quota(200, ""));
    }

    #[test]
    fn quota_by_body_token() {
        assert!(is_quota(200, "Error: RATE LIMIT exceeded, try later"));
        assert!(is_quota(200, "insufficient_quota for this key"));
        assert!(!is_quota(200, "internal server error"));
    }

    #[test]
    fn cooldown_daily_and_billing() {
        assert_eq!(
            cooldown_for(200, "daily limit exceeded"),
            Duration::from_secs(24 * 60 * 60)
        );
        assert_eq!(
            cooldown_for(402, "please check your billing details"),
            Duration::from_secs(24 * 60 * 60)
        );
    }

    #[test]
    fn cooldown_per_minute_and_429() {
        assert_eq!(cooldown_for(429, ""), Duration::from_secs(5 * 60));
        assert_eq!(
            cooldown_for(200, "tokens per minute exceeded"),
            Duration::from_secs(5 * 60)
        );
    }

    #[test]
    fn cooldown_default() {
        assert_eq!(cooldown_for(500, "server error"), Duration::from_secs(60 * 60));
    }
}
