//! Request-scoped middleware. Authentication lives outside this crate's
//! scope (see README) — only request-id tagging is owned here.

mod request_id;

pub use request_id::RequestIdMiddleware;
