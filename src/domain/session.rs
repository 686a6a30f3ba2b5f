use super::error::AuthError;
use super::models::{AuthPrincipal, User};
use std::sync::Arc;

/// Issues and verifies opaque bearer tokens.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    // ---
    /// Starts a session for `user` and returns its token.
    async fn issue(&self, user: &User) -> Result<String, AuthError>;

    /// Resolves a token to the principal it was issued for.
    ///
    /// Unknown and expired tokens fail with [`AuthError::InvalidToken`].
    async fn verify(&self, token: &str) -> Result<AuthPrincipal, AuthError>;

    /// Cheap round trip to the backing store, used by the full health check.
    async fn ping(&self) -> Result<(), AuthError>;
}

/// Type alias for any backend that implements SessionStore.
pub type SessionStorePtr = Arc<dyn SessionStore>;
