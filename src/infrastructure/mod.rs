mod database;
mod memory;
mod metrics;
mod password;
mod redis_sessions;

// Re-export the factory functions for easy access
pub use database::{create_postgres_repository, init_database_with_retry};
pub use memory::{create_memory_repository, create_memory_sessions};
pub use metrics::{create_noop_metrics, create_prom_metrics};
pub use redis_sessions::create_redis_sessions;

pub(crate) use password::{hash_password, verify_password};
