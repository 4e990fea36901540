//! The single generic upstream client used by every capability route.
//!
//! Per-capability body shaping (vision content parts, audio multipart
//! uploads, image-generation prompts) is not the router's concern and
//! lives in `server::routes`; this module only owns the transport.

pub mod client;

pub use client::GenericProvider;
