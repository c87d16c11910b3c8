use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric variable cannot be parsed.
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
/// Returns `ConfigError` if a numeric variable cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// config pointing at `db/crc.db` and `config/catalog.yaml`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let database_url = or_default("PRICEGRAB_DATABASE_URL", "sqlite://db/crc.db");
    let catalog_path = PathBuf::from(or_default(
        "PRICEGRAB_CATALOG_PATH",
        "./config/catalog.yaml",
    ));
    let output_dir = PathBuf::from(or_default("PRICEGRAB_OUTPUT_DIR", "./output"));
    let log_level = or_default("PRICEGRAB_LOG_LEVEL", "info");
    let user_agent = or_default("PRICEGRAB_USER_AGENT", "pricegrab/0.1 (variant-tracker)");

    let request_timeout_secs = parse_u64("PRICEGRAB_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICEGRAB_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }

    let db_max_connections = parse_u32("PRICEGRAB_DB_MAX_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("PRICEGRAB_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        catalog_path,
        output_dir,
        log_level,
        request_timeout_secs,
        user_agent,
        db_max_connections,
        db_acquire_timeout_secs,
    })
}
