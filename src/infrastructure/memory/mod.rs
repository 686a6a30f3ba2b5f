// src/infrastructure/memory/mod.rs
mod memory_repository;
mod memory_sessions;

pub use memory_repository::MemoryRepository;
pub use memory_sessions::MemorySessionStore;

use crate::domain::{RepositoryPtr, SessionStorePtr};
use std::sync::Arc;
use std::time::Duration;

/// Creates an empty in-memory repository.
///
/// Data lives only as long as the process; useful for development and tests.
pub fn create_memory_repository() -> RepositoryPtr {
    Arc::new(MemoryRepository::new())
}

/// Creates an in-memory session store whose tokens expire after `ttl`.
pub fn create_memory_sessions(ttl: Duration) -> SessionStorePtr {
    Arc::new(MemorySessionStore::new(ttl))
}
