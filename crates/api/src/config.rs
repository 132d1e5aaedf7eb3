use std::str::FromStr;
use std::time::Duration;

use eggwatch_core::monitoring::{MonitorConfig, DEFAULT_HISTORY_WINDOW};
use eggwatch_core::species::DEFAULT_SPECIES;

use crate::auth::jwt::JwtConfig;

/// Upper bound for `HISTORY_RETENTION_HOURS` (ten years).
pub const MAX_HISTORY_RETENTION_HOURS: u32 = 24 * 365 * 10;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background jobs, in seconds (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// JWT validation settings for the threshold-mutation bearer token.
    pub jwt: JwtConfig,
    /// Monitoring cycle tunables.
    pub monitor: MonitorConfig,
    /// History retention horizon in hours, in `1..=MAX_HISTORY_RETENTION_HOURS`.
    /// `None` disables the retention job.
    pub history_retention_hours: Option<u32>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `10`                    |
    /// | `MONITOR_DEFAULT_SPECIES` | `Chicken Egg`           |
    /// | `MONITOR_HISTORY_WINDOW`  | `10`                    |
    /// | `MONITOR_IO_TIMEOUT_SECS` | `5`                     |
    /// | `HISTORY_RETENTION_HOURS` | unset (job disabled)    |
    ///
    /// # Panics
    ///
    /// Panics if a variable is set but cannot be parsed, or if the JWT
    /// settings are invalid (see [`JwtConfig::from_env`]).
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000);

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);
        let shutdown_timeout_secs: u64 = env_or("SHUTDOWN_TIMEOUT_SECS", 10);

        let monitor = MonitorConfig {
            default_species: std::env::var("MONITOR_DEFAULT_SPECIES")
                .unwrap_or_else(|_| DEFAULT_SPECIES.into()),
            history_window: env_or("MONITOR_HISTORY_WINDOW", DEFAULT_HISTORY_WINDOW),
            io_timeout: Duration::from_secs(env_or("MONITOR_IO_TIMEOUT_SECS", 5)),
        };
        assert!(
            monitor.history_window > 0,
            "MONITOR_HISTORY_WINDOW must be positive"
        );

        let history_retention_hours = std::env::var("HISTORY_RETENTION_HOURS")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| parse_retention_hours(&v).unwrap_or_else(|e| panic!("{e}")));

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            monitor,
            history_retention_hours,
        }
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse as `T`.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

/// Parse `HISTORY_RETENTION_HOURS`.
///
/// Zero or negative horizons would put the cutoff at or after "now" and purge
/// the whole log, so only `1..=MAX_HISTORY_RETENTION_HOURS` is accepted.
pub fn parse_retention_hours(raw: &str) -> Result<u32, String> {
    let hours: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("HISTORY_RETENTION_HOURS must be an integer, got '{raw}'"))?;
    match u32::try_from(hours) {
        Ok(h) if (1..=MAX_HISTORY_RETENTION_HOURS).contains(&h) => Ok(h),
        _ => Err(format!(
            "HISTORY_RETENTION_HOURS must be between 1 and {MAX_HISTORY_RETENTION_HOURS}, got {hours}"
        )),
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
