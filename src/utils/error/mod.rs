//! Error handling utilities
//!
//! This module provides the crate-wide error type and result alias.

pub mod error;

pub use error::{GatewayError, Result};
