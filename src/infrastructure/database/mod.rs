//! PostgreSQL connection setup and schema bootstrap.

mod postgres_repository;


use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

pub use postgres_repository::PostgresRepository;

/// Delay between connection attempts during startup.
const RETRY_DELAY: Duration = Duration::from_secs(2);

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id            UUID PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    name          TEXT,
    password_hash TEXT NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL
)";

const CREATE_BLOGS: &str = "CREATE TABLE IF NOT EXISTS blogs (
    id         UUID PRIMARY KEY,
    title      TEXT NOT NULL,
    author     TEXT NOT NULL,
    url        TEXT NOT NULL,
    likes      BIGINT NOT NULL DEFAULT 0,
    owner_id   UUID REFERENCES users(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const CREATE_BLOGS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS blogs_owner_id_idx ON blogs (owner_id, created_at)";

/// Connects to PostgreSQL, retrying while the server comes up, and makes
/// sure the schema exists.
///
/// # Errors
/// Returns the last connection error once `retry_count` attempts are used up,
/// or any error raised while creating the schema.
pub async fn init_database_with_retry(config: &DatabaseConfig) -> Result<PgPool> {
    // ---
    let attempts = config.retry_count.max(1);
    let mut last_err = None;

    for attempt in 1..=attempts {
        match PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("Connected to database on attempt {attempt}/{attempts}");
                ensure_schema(&pool).await?;
                return Ok(pool);
            }
            Err(err) => {
                tracing::warn!("Database connection attempt {attempt}/{attempts} failed: {err}");
                last_err = Some(err);
                if attempt < attempts {
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }

    Err(anyhow::anyhow!(
        "could not connect to database after {attempts} attempts: {}",
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

async fn ensure_schema(pool: &PgPool) -> Result<()> {
    // ---
    for statement in [CREATE_USERS, CREATE_BLOGS, CREATE_BLOGS_OWNER_INDEX] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("failed to create database schema")?;
    }
    Ok(())
}

/// Creates a repository backed by `pool`.
pub fn create_postgres_repository(pool: PgPool) -> crate::domain::RepositoryPtr {
    // ---
    Arc::new(PostgresRepository::new(pool))
}
