// src/lib.rs
use anyhow::Result;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use handlers::*;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod middleware;

// Hoist up only the public symbol(s)
pub use app_state::AppState;
pub use config::*;
pub use handlers::{ApiError, ApiResult};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_memory_repository, // ---
    create_memory_sessions,
    create_noop_metrics,
    create_postgres_repository,
    create_prom_metrics,
    create_redis_sessions,
    init_database_with_retry,
};

/// Build the HTTP router from environment configuration.
///
/// Connects to PostgreSQL (with retries) when that backend is selected, so
/// this must run inside a Tokio runtime.
pub async fn create_router() -> Result<Router> {
    // ---
    // Load all configuration from environment
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt::try_init().ok(); // Ignores if already initialized

    let app_state = build_state(&config).await?;

    Ok(create_router_with(app_state))
}

/// Creates the repository, session store and metrics that `config` selects.
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    // ---
    let metrics = match config.server.metrics_type {
        MetricsType::Prom => create_prom_metrics()?,
        MetricsType::Noop => create_noop_metrics()?,
    };

    let (repository, sessions) = match &config.storage {
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            (
                create_memory_repository(),
                create_memory_sessions(config.server.session_ttl),
            )
        }
        StorageConfig::Postgres { database, redis } => {
            let pool = init_database_with_retry(database).await?;
            (
                create_postgres_repository(pool),
                create_redis_sessions(&redis.url, config.server.session_ttl)?,
            )
        }
    };

    Ok(AppState::new(repository, sessions, metrics))
}

/// Build the HTTP router around an already-assembled state.
pub fn create_router_with(app_state: AppState) -> Router {
    // ---
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/blogs", get(list_blogs).post(create_blog))
        .route(
            "/api/blogs/{id}",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
        .route("/api/stats", get(blog_stats))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/login", post(login))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::track_requests,
        ))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::domain::{NewBlog, NewUser, User};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    fn memory_router() -> Router {
        // ---
        create_router_with(AppState::new(
            create_memory_repository(),
            create_memory_sessions(Duration::from_secs(60)),
            create_noop_metrics().unwrap(),
        ))
    }

    #[tokio::test]
    async fn stats_on_empty_store_report_no_data() {
        // ---
        let response = memory_router()
            .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["data"]["totalLikes"], 0);
        assert!(json["data"]["favoriteBlog"].is_null());
        assert!(json["data"]["mostBlogs"].is_null());
        assert!(json["data"]["mostLikes"].is_null());
    }

    #[tokio::test]
    async fn malformed_blog_id_is_bad_request() {
        // ---
        let response = memory_router()
            .oneshot(Request::get("/api/blogs/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_without_token_is_unauthorized() {
        // ---
        let response = memory_router()
            .oneshot(
                Request::delete(format!("/api/blogs/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        // ---
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn new_user(username: &str) -> NewUser {
        // ---
        NewUser {
            username: username.to_string(),
            name: None,
            password_hash: "hash".to_string(),
        }
    }

    fn new_blog(owner_id: uuid::Uuid, likes: u64) -> NewBlog {
        // ---
        NewBlog {
            title: "Huge".to_string(),
            author: "Someone".to_string(),
            url: "https://blogs.example/huge".to_string(),
            likes,
            owner_id,
        }
    }

    #[tokio::test]
    async fn stats_stay_up_when_stored_likes_are_huge() {
        // ---
        let repository = create_memory_repository();
        let owner = repository.create_user(new_user("root")).await.unwrap();
        repository.create_blog(new_blog(owner.id, u64::MAX)).await.unwrap();
        repository.create_blog(new_blog(owner.id, u64::MAX)).await.unwrap();

        let router = create_router_with(AppState::new(
            repository,
            create_memory_sessions(Duration::from_secs(60)),
            create_noop_metrics().unwrap(),
        ));

        let response = router
            .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["totalLikes"], u64::MAX);
        assert_eq!(json["data"]["mostLikes"]["likes"], u64::MAX);
    }

    #[tokio::test]
    async fn delete_with_token_of_vanished_user_is_bad_request() {
        // ---
        let repository = create_memory_repository();
        let sessions = create_memory_sessions(Duration::from_secs(60));

        let owner = repository.create_user(new_user("owner")).await.unwrap();
        let blog = repository.create_blog(new_blog(owner.id, 1)).await.unwrap();

        // A live token for a user the repository has never stored.
        let vanished = User::new(new_user("vanished"));
        let token = sessions.issue(&vanished).await.unwrap();

        let router = create_router_with(AppState::new(
            repository.clone(),
            sessions,
            create_noop_metrics().unwrap(),
        ));

        let response = router
            .oneshot(
                Request::delete(format!("/api/blogs/{}", blog.id))
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert!(repository.fetch_blog_by_id(blog.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn full_health_check_passes_on_memory_backend() {
        // ---
        let response = memory_router()
            .oneshot(Request::get("/health?mode=full").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
