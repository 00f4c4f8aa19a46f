//! Connection settings for the cart API client, loaded from `SHOPFRONT_*`
//! environment variables.

use thiserror::Error;

/// Errors from settings loading and validation.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Resolved client settings.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base URL of the commerce backend, e.g. `https://shop.example/api`.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Sales channel reported on checkout creation.
    pub channel: String,
}

/// Load client settings from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading.
///
/// # Errors
///
/// Returns `SettingsError` if required env vars are missing or values are
/// invalid.
pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    dotenvy::dotenv().ok();
    load_settings_from_env()
}

/// Load client settings from environment variables already in the process,
/// without touching `.env` files.
///
/// # Errors
///
/// Returns `SettingsError` if required env vars are missing or values are
/// invalid.
pub fn load_settings_from_env() -> Result<ClientSettings, SettingsError> {
    build_settings(|key| std::env::var(key))
}

/// Build settings using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the real environment so
/// tests can drive it with a plain `HashMap` lookup.
fn build_settings<F>(lookup: F) -> Result<ClientSettings, SettingsError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, SettingsError> {
        lookup(var).map_err(|_| SettingsError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, SettingsError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| SettingsError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = require("SHOPFRONT_API_BASE_URL")?;
    let request_timeout_secs = parse_u64("SHOPFRONT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPFRONT_USER_AGENT", "shopfront/0.1");
    let channel = or_default("SHOPFRONT_CHANNEL", "web");

    Ok(ClientSettings {
        api_base_url,
        request_timeout_secs,
        user_agent,
        channel,
    })
}
