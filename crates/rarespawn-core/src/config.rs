use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(trimmed.to_string())
    };

    let env = parse_environment(&or_default("RARESPAWN_ENV", "development"));

    let bind_addr = parse_addr("RARESPAWN_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("RARESPAWN_LOG_LEVEL", "info");
    let format_path = PathBuf::from(or_default("RARESPAWN_FORMAT_PATH", "./config/format.yaml"));
    let names_path = PathBuf::from(or_default(
        "RARESPAWN_NAMES_PATH",
        "./config/pokemon_names.json",
    ));
    let labels_path = PathBuf::from(or_default("RARESPAWN_LABELS_PATH", "./data/labels.json"));

    let translate_base_url = non_empty(
        "RARESPAWN_TRANSLATE_BASE_URL",
        "https://translate.googleapis.com/",
    )?;
    let translate_timeout_ms = parse_u64("RARESPAWN_TRANSLATE_TIMEOUT_MS", "3000")?;
    if translate_timeout_ms == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RARESPAWN_TRANSLATE_TIMEOUT_MS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let source_lang = non_empty("RARESPAWN_SOURCE_LANG", "en")?;
    let target_lang = non_empty("RARESPAWN_TARGET_LANG", "zh-TW")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        format_path,
        names_path,
        labels_path,
        translate_base_url,
        translate_timeout_ms,
        source_lang,
        target_lang,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
