use crate::app_config::{AppConfig, AssetConfig, Environment};
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
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

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

    let env_raw = or_default("ACTCOL_ENV", "development");
    let env = parse_environment(&env_raw).ok_or_else(|| ConfigError::InvalidEnvVar {
        var: "ACTCOL_ENV".to_string(),
        reason: format!("unknown environment '{env_raw}'"),
    })?;

    let sheet_url = lookup("GOOGLE_SHEETS_PUBLISHED_URL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let sheet_name = or_default("GOOGLE_SHEETS_BRANDS_SHEET", "Brands");

    let bind_addr = parse_addr("ACTCOL_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ACTCOL_LOG_LEVEL", "info");

    let revalidate_secs = parse_u64("ACTCOL_REVALIDATE_SECS", "300")?;
    let sheet_request_timeout_secs = parse_u64("ACTCOL_SHEET_REQUEST_TIMEOUT_SECS", "30")?;
    let sheet_user_agent = or_default("ACTCOL_SHEET_USER_AGENT", "actcol/0.1 (brand-catalog)");

    let defaults = AssetConfig::default();
    let assets = AssetConfig {
        icon_base: or_default("ACTCOL_ICON_BASE", &defaults.icon_base),
        image_base: or_default("ACTCOL_IMAGE_BASE", &defaults.image_base),
        extension: or_default("ACTCOL_ASSET_EXT", &defaults.extension),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        sheet_url,
        sheet_name,
        revalidate_secs,
        sheet_request_timeout_secs,
        sheet_user_agent,
        assets,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Returns `None` for unrecognized values.
fn parse_environment(s: &str) -> Option<Environment> {
    match s {
        "development" => Some(Environment::Development),
        "test" => Some(Environment::Test),
        "production" => Some(Environment::Production),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
