//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::auth::DEFAULT_SESSION_TTL;
use crate::cache::{InvalidationMode, DEFAULT_CACHE_TTL};

/// Database used by the server binary when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://logitrack.db";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL applied to every read-through cache entry
    pub cache_ttl: Duration,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Which invalidation policy runs on writes
    pub invalidation: InvalidationMode,
    /// SQLite URL; `None` keeps items and orders in process memory
    pub database_url: Option<String>,
    /// How long a login token stays valid after it is issued
    pub session_ttl: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL_SECS` - Cache entry TTL in seconds (default: 60)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    /// - `CACHE_INVALIDATION` - `ttl` or `strict` (default: `ttl`)
    /// - `DATABASE_URL` - SQLite URL, or `memory` for no persistence
    ///   (default: `sqlite://logitrack.db`)
    /// - `SESSION_TTL_SECS` - Login token lifetime in seconds (default: 14 days)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cache_ttl: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
            invalidation: env::var("CACHE_INVALIDATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.invalidation),
            database_url: match env::var("DATABASE_URL") {
                Ok(url) if url.eq_ignore_ascii_case("memory") || url.trim().is_empty() => None,
                Ok(url) => Some(url),
                Err(_) => Some(DEFAULT_DATABASE_URL.to_string()),
            },
            session_ttl: env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: DEFAULT_CACHE_TTL,
            cleanup_interval: 30,
            invalidation: InvalidationMode::TtlOnly,
            database_url: None,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.cleanup_interval, 30);
        assert_eq!(config.invalidation, InvalidationMode::TtlOnly);
        assert!(config.database_url.is_none());
        assert_eq!(config.session_ttl, Duration::from_secs(14 * 24 * 60 * 60));
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("SERVER_PORT", "8080");
        env::set_var("CACHE_TTL_SECS", "5");
        env::set_var("CLEANUP_INTERVAL", "not-a-number");
        env::set_var("CACHE_INVALIDATION", "strict");
        env::set_var("SESSION_TTL_SECS", "900");
        env::remove_var("DATABASE_URL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.cache_ttl, Duration::from_secs(5));
        assert_eq!(config.cleanup_interval, 30);
        assert_eq!(config.invalidation, InvalidationMode::Strict);
        assert_eq!(config.session_ttl, Duration::from_secs(900));
        assert_eq!(config.database_url.as_deref(), Some(DEFAULT_DATABASE_URL));

        env::set_var("DATABASE_URL", "memory");
        assert!(Config::from_env().database_url.is_none());

        env::set_var("DATABASE_URL", "sqlite:///var/lib/logitrack/data.db");
        assert_eq!(
            Config::from_env().database_url.as_deref(),
            Some("sqlite:///var/lib/logitrack/data.db")
        );

        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_TTL_SECS");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("CACHE_INVALIDATION");
        env::remove_var("SESSION_TTL_SECS");
        env::remove_var("DATABASE_URL");
    }
}
