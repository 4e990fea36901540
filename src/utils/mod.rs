//! Cross-cutting utilities: errors, logging, networking.

pub mod error;
pub mod logging;
pub mod net;
