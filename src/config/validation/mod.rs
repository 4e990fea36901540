pub mod ssrf;

/// Implemented by every config model; `validate` returns a human-readable
/// error instead of `GatewayError` so it composes without the error module
/// depending on config.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
