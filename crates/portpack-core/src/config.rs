use crate::app_config::{AppConfig, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default; API keys are optional and only checked when
/// the matching search provider is constructed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let log_level = or_default("PORTPACK_LOG_LEVEL", "info");
    let output_dir = PathBuf::from(or_default("PORTPACK_OUTPUT_DIR", "output"));
    let user_agent = or_default("PORTPACK_USER_AGENT", DEFAULT_USER_AGENT);

    let check_timeout_secs = parse_u64("PORTPACK_CHECK_TIMEOUT_SECS", "15")?;
    let page_timeout_secs = parse_u64("PORTPACK_PAGE_TIMEOUT_SECS", "20")?;
    let download_timeout_secs = parse_u64("PORTPACK_DOWNLOAD_TIMEOUT_SECS", "25")?;
    let min_kb = parse_u64("PORTPACK_MIN_KB", "30")?;
    let max_images_per_page = parse_usize("PORTPACK_MAX_IMAGES_PER_PAGE", "15")?;
    let max_results = parse_usize("PORTPACK_MAX_RESULTS", "10")?;

    if max_images_per_page == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PORTPACK_MAX_IMAGES_PER_PAGE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        output_dir,
        user_agent,
        check_timeout_secs,
        page_timeout_secs,
        download_timeout_secs,
        min_kb,
        max_images_per_page,
        max_results,
        bing_api_key: optional("BING_API_KEY"),
        bing_endpoint: optional("BING_ENDPOINT"),
        serpapi_api_key: optional("SERPAPI_API_KEY"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
