use crate::app_config::{AppConfig, Environment};
use crate::products::PriceBounds;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be exercised with a plain `HashMap`.
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
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("ARISE_ENV", "development"))?;

    let catalog_base = or_default("ARISE_CATALOG_BASE", "./site");
    if catalog_base.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "ARISE_CATALOG_BASE".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let log_level = or_default("ARISE_LOG_LEVEL", "info");
    let brands_path = lookup("ARISE_BRANDS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let request_timeout_secs = parse_u64("ARISE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ARISE_USER_AGENT", "arise/0.1 (storefront-preview)");
    let max_retries = parse_u32("ARISE_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("ARISE_RETRY_BACKOFF_BASE_SECS", "1")?;

    let price_floor = parse_u32("ARISE_PRICE_FLOOR", "0")?;
    let price_ceiling = parse_u32("ARISE_PRICE_CEILING", "20000")?;
    if price_floor > price_ceiling {
        return Err(ConfigError::InvalidEnvVar {
            var: "ARISE_PRICE_FLOOR".to_string(),
            reason: format!("floor {price_floor} exceeds ceiling {price_ceiling}"),
        });
    }

    let currency_symbol = or_default("ARISE_CURRENCY_SYMBOL", "₹");

    Ok(AppConfig {
        env,
        catalog_base,
        log_level,
        brands_path,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        price_bounds: PriceBounds::new(price_floor, price_ceiling),
        currency_symbol,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ARISE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
