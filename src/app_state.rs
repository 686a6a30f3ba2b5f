//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` holds the
//! repository, session store, and metrics implementations chosen at startup.
//!
//! Every field is an `Arc` behind a trait object, so cloning the state per
//! request is cheap.

use crate::domain::{MetricsPtr, RepositoryPtr, SessionStorePtr};

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the application.
/// Handlers depend on the `Repository`, `SessionStore` and `Metrics` traits,
/// never on Postgres, Redis or Prometheus directly.
///
/// # Lifecycle
///
/// 1. Created once in `build_state()` during application startup
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
/// 4. Handlers extract via `State(state): State<AppState>`
#[derive(Clone)]
pub struct AppState {
    /// Blog and user persistence.
    repository: RepositoryPtr,

    /// Issues login tokens and resolves bearer tokens to principals.
    sessions: SessionStorePtr,

    /// Metrics implementation for recording application events.
    ///
    /// Either Prometheus-backed (production) or no-op (testing/development).
    metrics: MetricsPtr,
}

impl AppState {
    // ---

    pub fn new(repository: RepositoryPtr, sessions: SessionStorePtr, metrics: MetricsPtr) -> Self {
        // ---
        AppState {
            repository,
            sessions,
            metrics,
        }
    }

    /// Get a reference to the repository implementation.
    pub(crate) fn repository(&self) -> &RepositoryPtr {
        // ---
        &self.repository
    }

    /// Get a reference to the session store.
    pub(crate) fn sessions(&self) -> &SessionStorePtr {
        // ---
        &self.sessions
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }
}
