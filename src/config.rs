// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used. This macro is appropriate for non-critical
/// tuning parameters where fallback behavior is acceptable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
/// All required configuration is validated eagerly during initialization.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: server::ServerConfig,
    pub storage: StorageConfig,
}

/// Where blogs, users and sessions are kept.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Everything in process memory; lost on restart.
    Memory,

    /// Blogs and users in PostgreSQL, sessions in Redis.
    Postgres {
        database: database::DatabaseConfig,
        redis: redis::RedisConfig,
    },
}

impl StorageConfig {
    /// Reads `BLOGLIST_STORAGE` (`postgres` by default, or `memory`) and the
    /// settings the chosen backend requires.
    ///
    /// # Errors
    /// Returns an error for an unknown storage kind or when the Postgres
    /// backend is selected without its required configuration.
    pub fn from_env() -> Result<Self> {
        // ---
        let kind = std::env::var("BLOGLIST_STORAGE").unwrap_or_else(|_| "postgres".to_string());

        match kind.as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" => Ok(Self::Postgres {
                database: database::DatabaseConfig::from_env()?,
                redis: redis::RedisConfig::from_env()?,
            }),
            other => Err(anyhow::anyhow!(
                "Unknown BLOGLIST_STORAGE `{other}` (expected `postgres` or `memory`)"
            )),
        }
    }
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            server: server::ServerConfig::from_env(),
            storage: StorageConfig::from_env()?,
        })
    }
}

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---
    use super::*;

    /// Which metrics backend to install.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MetricsType {
        Noop,
        Prom,
    }

    /// HTTP listener, session and metrics settings. All have defaults.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Address the HTTP server binds to. Defaults to `127.0.0.1:3003`.
        pub bind_addr: String,

        /// Lifetime of a login token. Defaults to 7 days.
        pub session_ttl: Duration,

        /// `prom` selects Prometheus; anything else is a no-op.
        pub metrics_type: MetricsType,
    }

    impl ServerConfig {
        pub fn from_env() -> Self {
            // ---
            let bind_addr =
                std::env::var("BLOGLIST_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3003".to_string());
            let ttl_secs = optional_env_parse!("BLOGLIST_SESSION_TTL_SEC", u64, 604_800);
            let metrics_type = match std::env::var("BLOGLIST_METRICS_TYPE").as_deref() {
                Ok("prom") => MetricsType::Prom,
                _ => MetricsType::Noop,
            };

            Self {
                bind_addr,
                session_ttl: Duration::from_secs(ttl_secs),
                metrics_type,
            }
        }
    }
}
pub use server::{MetricsType, ServerConfig};

// ============================================================
// Database configuration
// ============================================================

mod database {
    // ---
    use super::*;

    /// Database-related configuration derived from environment variables.
    ///
    /// Required when the Postgres backend is selected, and validated eagerly
    /// during startup.
    #[derive(Debug, Clone)]
    pub struct DatabaseConfig {
        /// PostgreSQL connection string.
        pub database_url: String,

        /// Number of retry attempts when initializing the database connection. Defaults to 50.
        pub retry_count: u32,

        /// Maximum time to wait when acquiring a connection from the pool. Defaults to 30 seconds.
        pub acquire_timeout: Duration,

        /// Minimum number of connections to keep in the pool, even when idle. Defaults to 2.
        pub min_connections: u32,

        /// Maximum number of connections open concurrently. Defaults to 15.
        pub max_connections: u32,
    }

    impl DatabaseConfig {
        /// Builds a [`DatabaseConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if required configuration is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            let database_url = required_env!("DATABASE_URL");
            let retry_count = optional_env_parse!("BLOGLIST_DB_RETRY_COUNT", u32, 50);
            let acquire_timeout_secs = optional_env_parse!("BLOGLIST_DB_ACQUIRE_TIMEOUT_SEC", u64, 30);
            let min_connections = optional_env_parse!("BLOGLIST_DB_MIN_CONNECTIONS", u32, 2);
            let max_connections = optional_env_parse!("BLOGLIST_DB_MAX_CONNECTIONS", u32, 15);

            Ok(Self {
                database_url,
                retry_count,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
                min_connections,
                max_connections,
            })
        }
    }
}
pub use database::DatabaseConfig;

// ============================================================
// Redis configuration
// ============================================================

mod redis {
    // ---
    use super::*;

    /// Redis holds login sessions when the Postgres backend is selected.
    #[derive(Debug, Clone)]
    pub struct RedisConfig {
        /// Redis connection string.
        pub url: String,
    }

    impl RedisConfig {
        /// Builds a [`RedisConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if required configuration is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            let url = required_env!("BLOGLIST_REDIS_URL");

            Ok(Self { url })
        }
    }
}
pub use redis::RedisConfig;

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use anyhow::Result;
    use serial_test::serial;

    #[test]
    #[serial]
    fn missing_database_url_fails() -> Result<()> {
        // ---
        std::env::remove_var("DATABASE_URL");

        assert_missing_config!(database::DatabaseConfig::from_env(), "DATABASE_URL");

        Ok(())
    }

    #[test]
    #[serial]
    fn database_defaults_applied() -> Result<()> {
        // ---
        let db_url = "postgres://test";
        std::env::set_var("DATABASE_URL", db_url);

        std::env::remove_var("BLOGLIST_DB_RETRY_COUNT");
        std::env::remove_var("BLOGLIST_DB_ACQUIRE_TIMEOUT_SEC");
        std::env::remove_var("BLOGLIST_DB_MIN_CONNECTIONS");
        std::env::remove_var("BLOGLIST_DB_MAX_CONNECTIONS");

        let cfg = database::DatabaseConfig::from_env()?;
        assert_eq!(cfg.database_url, db_url);
        assert_eq!(cfg.retry_count, 50);
        assert_eq!(cfg.acquire_timeout.as_secs(), 30);
        assert_eq!(cfg.min_connections, 2);
        assert_eq!(cfg.max_connections, 15);

        Ok(())
    }

    #[test]
    #[serial]
    fn database_overrides_defaults() -> Result<()> {
        // ---
        let db_url = "postgres://test";
        std::env::set_var("DATABASE_URL", db_url);
        std::env::set_var("BLOGLIST_DB_RETRY_COUNT", "3");
        std::env::set_var("BLOGLIST_DB_ACQUIRE_TIMEOUT_SEC", "5");
        std::env::set_var("BLOGLIST_DB_MIN_CONNECTIONS", "10");
        std::env::set_var("BLOGLIST_DB_MAX_CONNECTIONS", "1000");

        let cfg = database::DatabaseConfig::from_env()?;
        assert_eq!(cfg.retry_count, 3);
        assert_eq!(cfg.acquire_timeout.as_secs(), 5);
        assert_eq!(cfg.min_connections, 10);
        assert_eq!(cfg.max_connections, 1000);

        std::env::remove_var("BLOGLIST_DB_RETRY_COUNT");
        std::env::remove_var("BLOGLIST_DB_ACQUIRE_TIMEOUT_SEC");
        std::env::remove_var("BLOGLIST_DB_MIN_CONNECTIONS");
        std::env::remove_var("BLOGLIST_DB_MAX_CONNECTIONS");

        Ok(())
    }

    #[test]
    #[serial]
    fn server_defaults_applied() {
        // ---
        std::env::remove_var("BLOGLIST_BIND_ADDR");
        std::env::remove_var("BLOGLIST_SESSION_TTL_SEC");
        std::env::remove_var("BLOGLIST_METRICS_TYPE");

        let cfg = ServerConfig::from_env();
        assert_eq!(cfg.bind_addr, "127.0.0.1:3003");
        assert_eq!(cfg.session_ttl, Duration::from_secs(604_800));
        assert_eq!(cfg.metrics_type, MetricsType::Noop);
    }

    #[test]
    #[serial]
    fn unparseable_ttl_falls_back_to_default() {
        // ---
        std::env::set_var("BLOGLIST_SESSION_TTL_SEC", "one week");
        std::env::set_var("BLOGLIST_METRICS_TYPE", "prom");

        let cfg = ServerConfig::from_env();
        assert_eq!(cfg.session_ttl, Duration::from_secs(604_800));
        assert_eq!(cfg.metrics_type, MetricsType::Prom);

        std::env::remove_var("BLOGLIST_SESSION_TTL_SEC");
        std::env::remove_var("BLOGLIST_METRICS_TYPE");
    }

    #[test]
    #[serial]
    fn memory_storage_needs_no_database() -> Result<()> {
        // ---
        std::env::set_var("BLOGLIST_STORAGE", "memory");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("BLOGLIST_REDIS_URL");

        let cfg = AppConfig::from_env()?;
        assert!(matches!(cfg.storage, StorageConfig::Memory));

        std::env::remove_var("BLOGLIST_STORAGE");
        Ok(())
    }

    #[test]
    #[serial]
    fn postgres_storage_requires_redis_url() {
        // ---
        std::env::remove_var("BLOGLIST_STORAGE");
        std::env::set_var("DATABASE_URL", "postgres://test");
        std::env::remove_var("BLOGLIST_REDIS_URL");

        assert_missing_config!(AppConfig::from_env(), "BLOGLIST_REDIS_URL");
    }

    #[test]
    #[serial]
    fn app_config_from_env_success() -> Result<()> {
        // ---
        std::env::set_var("BLOGLIST_STORAGE", "postgres");
        std::env::set_var("DATABASE_URL", "postgres://test");
        std::env::set_var("BLOGLIST_REDIS_URL", "redis://localhost");

        let cfg = AppConfig::from_env()?;
        match cfg.storage {
            StorageConfig::Postgres { database, redis } => {
                assert_eq!(database.database_url, "postgres://test");
                assert_eq!(redis.url, "redis://localhost");
            }
            StorageConfig::Memory => panic!("expected postgres storage"),
        }

        std::env::remove_var("BLOGLIST_STORAGE");
        Ok(())
    }

    #[test]
    #[serial]
    fn unknown_storage_kind_fails() {
        // ---
        std::env::set_var("BLOGLIST_STORAGE", "mongodb");

        let err = StorageConfig::from_env().expect_err("unknown storage should fail");
        assert!(err.to_string().contains("mongodb"));

        std::env::remove_var("BLOGLIST_STORAGE");
    }
}
