use thiserror::Error;

/// Errors from the tenant runtime configuration store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A hydration payload must be a JSON object; anything else would
    /// replace the whole config instead of merging into it.
    #[error("config hydration payload must be a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },
}
