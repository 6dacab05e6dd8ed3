use crate::app_config::{AppConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let gemini_api_key = require("GEMINI_API_KEY")?;

    let log_level = or_default("PLACESCOUT_LOG_LEVEL", "info");

    let gemini_model = or_default("PLACESCOUT_GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    let gemini_base_url = or_default("PLACESCOUT_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);

    let request_timeout_secs = parse_u64("PLACESCOUT_REQUEST_TIMEOUT_SECS", "60")?;
    let max_attempts = parse_u32("PLACESCOUT_MAX_ATTEMPTS", "3")?;
    if max_attempts == 0 {
        return Err(invalid(
            "PLACESCOUT_MAX_ATTEMPTS",
            "must be at least 1".to_string(),
        ));
    }
    let retry_backoff_ms = parse_u64("PLACESCOUT_RETRY_BACKOFF_MS", "1000")?;

    let page_size = parse_usize("PLACESCOUT_PAGE_SIZE", "100")?;
    if page_size == 0 {
        return Err(invalid(
            "PLACESCOUT_PAGE_SIZE",
            "must be at least 1".to_string(),
        ));
    }

    let response_language = lookup("PLACESCOUT_RESPONSE_LANGUAGE")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    Ok(AppConfig {
        log_level,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        request_timeout_secs,
        max_attempts,
        retry_backoff_ms,
        page_size,
        response_language,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
