//! Networking utilities
//!
//! Shared HTTP client construction for upstream calls (provider requests and
//! health probes both go through clients built here).

pub mod http;

pub use http::build_client;
