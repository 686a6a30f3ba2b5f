use crate::domain::{AuthError, AuthPrincipal, SessionStore, User};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

struct Session {
    principal: AuthPrincipal,
    expires_at: DateTime<Utc>,
}

/// Process-local session store. Expired entries are dropped when looked up.
pub struct MemorySessionStore {
    // ---
    sessions: RwLock<HashMap<String, Session>>,
    ttl: chrono::Duration,
}

impl MemorySessionStore {
    // ---
    pub fn new(ttl: Duration) -> Self {
        // ---
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    // ---
    async fn issue(&self, user: &User) -> Result<String, AuthError> {
        // ---
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let session = Session {
            principal: AuthPrincipal {
                user_id: user.id,
                username: user.username.clone(),
            },
            expires_at,
        };
        self.sessions.write().await.insert(token.clone(), session);

        tracing::info!("Created session for user: {}", user.username);
        Ok(token)
    }

    async fn verify(&self, token: &str) -> Result<AuthPrincipal, AuthError> {
        // ---
        let mut sessions = self.sessions.write().await;

        match sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => Ok(session.principal.clone()),
            Some(_) => {
                sessions.remove(token);
                Err(AuthError::InvalidToken)
            }
            None => Err(AuthError::InvalidToken),
        }
    }

    async fn ping(&self) -> Result<(), AuthError> {
        // ---
        Ok(())
    }
}
