//! Message board configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BOARD_MONGODB_URI` - MongoDB connection string (falls back to `MONGODB_URI`).
//!   Only required when `BOARD_STORE=mongo`.
//!
//! ## Optional
//! - `BOARD_STORE` - Message store backend, `mongo` or `memory` (default: mongo)
//! - `BOARD_DATABASE` - Database name (default: the URI's database, else `message_board`)
//! - `BOARD_HOST` - Bind address (default: 0.0.0.0)
//! - `BOARD_PORT` - Listen port (default: 3000, falls back to `PORT`)
//! - `BOARD_ASSET_PATH` - Text asset served by `/wizfile` and `/wizexercise.txt`
//!   (default: `assets/wizexercise.txt` inside the web crate)
//! - `BOARD_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Asset path used when `BOARD_ASSET_PATH` is not set.
///
/// Anchored at this crate's directory so it resolves from any working directory.
pub const DEFAULT_ASSET_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/assets/wizexercise.txt");

/// Database name used when neither `BOARD_DATABASE` nor the URI names one.
pub const DEFAULT_DATABASE: &str = "message_board";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which message store backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// MongoDB collection.
    #[default]
    Mongo,
    /// Process-local store, lost on restart.
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store '{other}', expected 'mongo' or 'memory'")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}', expected 'pretty' or 'json'")),
        }
    }
}

/// MongoDB connection settings.
///
/// Implements `Debug` manually to redact the connection string.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Connection string (may contain credentials)
    pub uri: SecretString,
    /// Explicit database name, overriding the one in the URI
    pub database: Option<String>,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("uri", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

/// Message board application configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Message store backend
    pub store: StoreKind,
    /// MongoDB settings, present when `store` is `Mongo`
    pub database: Option<DatabaseConfig>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Text asset served raw and wrapped
    pub asset_path: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl BoardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store: StoreKind = parse_or_default(&lookup, "BOARD_STORE", "mongo")?;

        let database = match store {
            StoreKind::Mongo => {
                let uri = lookup("BOARD_MONGODB_URI")
                    .or_else(|| lookup("MONGODB_URI"))
                    .ok_or_else(|| ConfigError::MissingEnvVar("BOARD_MONGODB_URI".to_string()))?;
                Some(DatabaseConfig {
                    uri: SecretString::from(uri),
                    database: lookup("BOARD_DATABASE").filter(|name| !name.is_empty()),
                })
            }
            StoreKind::Memory => None,
        };

        let host = parse_or_default(&lookup, "BOARD_HOST", "0.0.0.0")?;
        let port = match lookup("BOARD_PORT") {
            Some(_) => parse_or_default(&lookup, "BOARD_PORT", "3000")?,
            None => parse_or_default(&lookup, "PORT", "3000")?,
        };
        let asset_path = PathBuf::from(
            lookup("BOARD_ASSET_PATH").unwrap_or_else(|| DEFAULT_ASSET_PATH.to_string()),
        );
        let log_format = parse_or_default(&lookup, "BOARD_LOG_FORMAT", "pretty")?;

        Ok(Self {
            store,
            database,
            host,
            port,
            asset_path,
            log_format,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or_default(&lookup, "SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_or_default(
                &lookup,
                "SENTRY_TRACES_SAMPLE_RATE",
                "0.0",
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<BoardConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        BoardConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_mongo_uri() {
        let config = load(&[("BOARD_MONGODB_URI", "mongodb://localhost:27017/board")]).unwrap();

        assert_eq!(config.store, StoreKind::Mongo);
        assert_eq!(config.port, 3000);
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.asset_path, PathBuf::from(DEFAULT_ASSET_PATH));
        assert!(config.asset_path.is_absolute());
        assert!(config.asset_path.is_file());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);

        let database = config.database.unwrap();
        assert_eq!(
            database.uri.expose_secret(),
            "mongodb://localhost:27017/board"
        );
        assert!(database.database.is_none());
    }

    #[test]
    fn test_missing_uri_is_an_error_for_mongo() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "BOARD_MONGODB_URI"));
    }

    #[test]
    fn test_generic_mongodb_uri_fallback() {
        let config = load(&[("MONGODB_URI", "mongodb://db:27017")]).unwrap();
        let database = config.database.unwrap();
        assert_eq!(database.uri.expose_secret(), "mongodb://db:27017");
    }

    #[test]
    fn test_memory_store_needs_no_uri() {
        let config = load(&[("BOARD_STORE", "memory")]).unwrap();
        assert_eq!(config.store, StoreKind::Memory);
        assert!(config.database.is_none());
    }

    #[test]
    fn test_unknown_store_is_rejected() {
        let err = load(&[("BOARD_STORE", "redis")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "BOARD_STORE"));
    }

    #[test]
    fn test_port_fallback_and_override() {
        let config = load(&[("BOARD_STORE", "memory"), ("PORT", "8080")]).unwrap();
        assert_eq!(config.port, 8080);

        let config = load(&[
            ("BOARD_STORE", "memory"),
            ("PORT", "8080"),
            ("BOARD_PORT", "9090"),
        ])
        .unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("BOARD_STORE", "memory"), ("BOARD_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "BOARD_PORT"));
    }

    #[test]
    fn test_socket_addr() {
        let config = load(&[
            ("BOARD_STORE", "memory"),
            ("BOARD_HOST", "127.0.0.1"),
            ("BOARD_PORT", "3000"),
        ])
        .unwrap();

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_database_config_debug_redacts_uri() {
        let config = DatabaseConfig {
            uri: SecretString::from("mongodb://user:super_secret_password@db:27017"),
            database: Some("board".to_string()),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("board"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password"));
    }
}
