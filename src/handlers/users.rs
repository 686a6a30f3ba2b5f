use crate::app_state::AppState;
use crate::domain::{Blog, NewUser, User, UserDraft};
use crate::handlers::error::{ApiError, ApiResult};
use crate::handlers::shared_types::ApiResponse;
use crate::infrastructure::hash_password;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Response Types
// ============================================================================

/// Public view of a user. The password hash is never part of it.
#[derive(Debug, Serialize)]
pub struct UserView {
    // ---
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<BlogSummary>,
}

/// The fields of an owned blog shown alongside its user.
#[derive(Debug, Serialize)]
pub struct BlogSummary {
    // ---
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
}

impl From<&Blog> for BlogSummary {
    fn from(blog: &Blog) -> Self {
        // ---
        Self {
            id: blog.id,
            title: blog.title.clone(),
            author: blog.author.clone(),
            url: blog.url.clone(),
        }
    }
}

impl UserView {
    /// Builds the view, resolving `blog_ids` against `blogs`. Ids with no
    /// matching blog are skipped.
    fn new(user: User, blogs: &HashMap<Uuid, &Blog>) -> Self {
        // ---
        let owned = user
            .blog_ids
            .iter()
            .filter_map(|id| blogs.get(id))
            .map(|blog| BlogSummary::from(*blog))
            .collect();

        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: owned,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/users
///
/// Lists all users, each with the blogs they created.
#[tracing::instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<UserView>>> {
    // ---
    let users = state.repository().fetch_all_users().await?;
    let blogs = state.repository().fetch_all_blogs().await?;
    let by_id: HashMap<Uuid, &Blog> = blogs.iter().map(|b| (b.id, b)).collect();

    let views = users.into_iter().map(|u| UserView::new(u, &by_id)).collect();

    Ok(ApiResponse { data: views })
}

/// POST /api/users
///
/// Registers a new account.
///
/// # Errors
///
/// - `400 Bad Request` if the body is malformed, the username is shorter than
///   three characters or has disallowed characters, or the password is
///   missing or shorter than three characters.
/// - `409 Conflict` if the username is already taken.
#[tracing::instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<UserDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, ApiResponse<UserView>)> {
    // ---
    let Json(draft) = body?;
    let registration = draft.validate()?;

    // CPU-bound; runs on the blocking pool.
    let password = registration.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .map_err(ApiError::Internal)?;

    let user = state
        .repository()
        .create_user(NewUser {
            username: registration.username,
            name: registration.name,
            password_hash,
        })
        .await?;
    state.metrics().record_user_created();

    tracing::info!("Registered user {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        ApiResponse {
            data: UserView::new(user, &HashMap::new()),
        },
    ))
}
