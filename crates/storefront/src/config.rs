//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CARTWHEEL_DATABASE_URL` - SQLite URL for session records
//!   (default: `sqlite://cartwheel.db?mode=rwc`)
//! - `CARTWHEEL_HOST` - Bind address (default: 127.0.0.1)
//! - `CARTWHEEL_PORT` - Listen port (default: 3000)
//! - `CARTWHEEL_BASE_URL` - Public URL; `https://` enables secure cookies
//!   (default: `http://localhost:3000`)
//! - `CARTWHEEL_STATIC_DIR` - Directory with the static page set
//!   (default: `crates/storefront/static`)
//! - `CARTWHEEL_CART_RETENTION_DAYS` - Days of inactivity before a shopper's
//!   session, and the cart in it, expires (default: 365)
//! - `CARTWHEEL_LOG_FORMAT` - `text` or `json` (default: `text`)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// SQLite connection URL for the session store
    pub database_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory served for every path the cart routes don't handle
    pub static_dir: PathBuf,
    /// Session inactivity expiry in days
    pub cart_retention_days: u16,
    /// Log output format
    pub log_format: LogFormat,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url =
            get_env_or_default("CARTWHEEL_DATABASE_URL", "sqlite://cartwheel.db?mode=rwc");
        let host = parse_env_or_default("CARTWHEEL_HOST", "127.0.0.1")?;
        let port = parse_env_or_default("CARTWHEEL_PORT", "3000")?;
        let base_url = get_env_or_default("CARTWHEEL_BASE_URL", "http://localhost:3000");
        let static_dir = PathBuf::from(get_env_or_default(
            "CARTWHEEL_STATIC_DIR",
            "crates/storefront/static",
        ));
        let cart_retention_days = parse_env_or_default("CARTWHEEL_CART_RETENTION_DAYS", "365")?;
        if cart_retention_days == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CARTWHEEL_CART_RETENTION_DAYS".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let log_format = parse_env_or_default("CARTWHEEL_LOG_FORMAT", "text")?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            static_dir,
            cart_retention_days,
            log_format,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
