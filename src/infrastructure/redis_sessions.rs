//! Session management backed by Redis.
//!
//! Tokens are random UUIDs stored under `session:{token}` with a TTL, so
//! Redis expires them without any sweeping on our side.

use crate::domain::{AuthError, AuthPrincipal, SessionStore, SessionStorePtr, User};
use anyhow::Context;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

// ---

/// Session data stored in Redis.
#[derive(Debug, Serialize, Deserialize)]
struct SessionData {
    //
    user_id: Uuid,
    username: String,
    expires_at: i64,
}

// ---

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

/// Redis-backed [`SessionStore`].
pub struct RedisSessionStore {
    // ---
    client: Client,
    ttl: Duration,
}

impl RedisSessionStore {
    // ---
    pub fn new(client: Client, ttl: Duration) -> Self {
        // ---
        Self { client, ttl }
    }

    /// Creates a new multiplexed Redis connection.
    async fn get_conn(&self) -> Result<MultiplexedConnection, AuthError> {
        // ---
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|err| {
                tracing::error!("Failed to connect to Redis: {:?}", err);
                AuthError::Backend(err.into())
            })
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    // ---
    async fn issue(&self, user: &User) -> Result<String, AuthError> {
        //
        let token = Uuid::new_v4().to_string();
        let ttl_secs = self.ttl.as_secs().max(1);
        let expires_at = chrono::Utc::now().timestamp() + i64::try_from(ttl_secs).unwrap_or(i64::MAX / 2);

        let session_data = SessionData {
            //
            user_id: user.id,
            username: user.username.clone(),
            expires_at,
        };

        let session_json = serde_json::to_string(&session_data)
            .context("Failed to serialize session data")?;

        let mut conn = self.get_conn().await?;
        conn.set_ex::<_, _, ()>(session_key(&token), session_json, ttl_secs)
            .await
            .map_err(|e| {
                //
                tracing::error!("Failed to store session in Redis: {}", e);
                AuthError::Backend(e.into())
            })?;

        tracing::info!("Created session for user: {}", user.username);

        Ok(token)
    }

    async fn verify(&self, token: &str) -> Result<AuthPrincipal, AuthError> {
        //
        let mut conn = self.get_conn().await?;

        let stored: Option<String> = conn.get(session_key(token)).await.map_err(|e| {
            //
            tracing::error!("Failed to read session from Redis: {}", e);
            AuthError::Backend(e.into())
        })?;

        let session_json = stored.ok_or_else(|| {
            tracing::debug!("Session token not found");
            AuthError::InvalidToken
        })?;

        let session: SessionData = serde_json::from_str(&session_json).map_err(|e| {
            //
            tracing::warn!("Discarding unreadable session payload: {}", e);
            AuthError::InvalidToken
        })?;

        // Redis expires keys lazily; trust our own timestamp as well.
        if session.expires_at <= chrono::Utc::now().timestamp() {
            return Err(AuthError::InvalidToken);
        }

        Ok(AuthPrincipal {
            user_id: session.user_id,
            username: session.username,
        })
    }

    async fn ping(&self) -> Result<(), AuthError> {
        // ---
        let mut conn = self.get_conn().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| AuthError::Backend(e.into()))?;
        Ok(())
    }
}

/// Creates a session store that keeps tokens in Redis at `url`.
///
/// The connection is opened lazily, so this only fails on a malformed URL.
pub fn create_redis_sessions(url: &str, ttl: Duration) -> anyhow::Result<SessionStorePtr> {
    // ---
    let client = Client::open(url)?;
    Ok(Arc::new(RedisSessionStore::new(client, ttl)))
}
