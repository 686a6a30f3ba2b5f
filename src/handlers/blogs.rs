use crate::app_state::AppState;
use crate::domain::{can_delete, check_likes, AuthPrincipal, Blog, BlogDraft, NewBlog, User};
use crate::handlers::auth::extract_principal;
use crate::handlers::error::{ApiError, ApiResult};
use crate::handlers::shared_types::ApiResponse;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

/// Body accepted by PUT /api/blogs/{id}.
#[derive(Debug, Deserialize)]
pub struct UpdateLikes {
    likes: u64,
}

/// Resolves the user behind a verified token. A token can outlive its user,
/// which is a bad request rather than an authentication failure.
async fn resolve_user(state: &AppState, principal: &AuthPrincipal) -> ApiResult<User> {
    // ---
    state
        .repository()
        .fetch_user_by_id(principal.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token refers to missing user {}", principal.user_id);
            ApiError::BadRequest("user for this token no longer exists".to_string())
        })
}

/// Parses a blog id from the path; a malformed id is the client's fault.
fn parse_blog_id(raw: &str) -> ApiResult<Uuid> {
    // ---
    Uuid::parse_str(raw).map_err(|_| {
        tracing::debug!("Malformed blog id: {}", raw);
        ApiError::BadRequest(format!("malformed blog id `{raw}`"))
    })
}

/// Handler for listing every blog (GET /api/blogs).
#[tracing::instrument(skip(state))]
pub async fn list_blogs(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Blog>>> {
    // ---
    let blogs = state.repository().fetch_all_blogs().await?;

    Ok(ApiResponse { data: blogs })
}

/// Handler for fetching a blog by ID (GET /api/blogs/{id}).
///
/// - `200 OK` with the blog if it exists.
/// - `400 Bad Request` if the id is not a valid identifier.
/// - `404 Not Found` if no blog has that id.
#[tracing::instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Blog>> {
    // ---
    let blog_id = parse_blog_id(&id)?;

    let blog = state
        .repository()
        .fetch_blog_by_id(blog_id)
        .await?
        .ok_or(ApiError::NotFound("blog"))?;

    Ok(ApiResponse { data: blog })
}

/// Handler for creating a blog (POST /api/blogs).
///
/// Requires a bearer token; the new blog is owned by the token's user and
/// appended to that user's blog list.
///
/// - `201 Created` with the stored blog.
/// - `400 Bad Request` if the body is malformed, a required field is
///   missing, or the token's user no longer exists.
/// - `401 Unauthorized` if the token is missing or invalid.
#[tracing::instrument(skip(state, headers, body))]
pub async fn create_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<BlogDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, ApiResponse<Blog>)> {
    // ---
    let principal = extract_principal(&headers, &state).await?;
    let Json(draft) = body?;

    let owner = resolve_user(&state, &principal).await?;

    let new_blog = NewBlog::parse(draft, owner.id)?;
    let blog = state.repository().create_blog(new_blog).await?;
    state.metrics().record_blog_created();

    tracing::info!("{} created blog {}/{}", owner.username, blog.id, blog.title);

    Ok((StatusCode::CREATED, ApiResponse { data: blog }))
}

/// Handler for updating the likes of a blog (PUT /api/blogs/{id}).
///
/// - `200 OK` with the updated blog.
/// - `400 Bad Request` for a malformed id or body, or likes beyond the
///   storable range.
/// - `404 Not Found` if no blog has that id.
#[tracing::instrument(skip(state, body))]
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateLikes>, JsonRejection>,
) -> ApiResult<ApiResponse<Blog>> {
    // ---
    let blog_id = parse_blog_id(&id)?;
    let Json(update) = body?;
    let likes = check_likes(update.likes)?;

    let blog = state
        .repository()
        .update_blog_likes(blog_id, likes)
        .await?
        .ok_or(ApiError::NotFound("blog"))?;

    Ok(ApiResponse { data: blog })
}

/// Delete a blog by its ID (DELETE /api/blogs/{id}).
///
/// Only the user who created a blog may delete it.
///
/// Returns:
/// - `204 No Content` if the blog was deleted.
/// - `400 Bad Request` if the id is malformed or the token's user no longer
///   exists.
/// - `401 Unauthorized` if the token is missing or invalid.
/// - `403 Forbidden` if the caller does not own the blog, or it has no owner.
/// - `404 Not Found` if no blog has that id.
#[tracing::instrument(skip(state, headers))]
pub async fn delete_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    // ---
    let principal = extract_principal(&headers, &state).await?;
    let user = resolve_user(&state, &principal).await?;
    let blog_id = parse_blog_id(&id)?;

    let blog = state
        .repository()
        .fetch_blog_by_id(blog_id)
        .await?
        .ok_or(ApiError::NotFound("blog"))?;

    if !can_delete(Some(&principal), Some(&blog)) {
        // ---
        tracing::warn!(
            "User {} attempted to delete blog {} owned by {:?}",
            user.id,
            blog.id,
            blog.owner_id
        );
        return Err(ApiError::Forbidden(
            "only the creator can delete this blog".to_string(),
        ));
    }

    if !state.repository().delete_blog_by_id(blog_id).await? {
        // Deleted concurrently between the lookup and now.
        return Err(ApiError::NotFound("blog"));
    }
    state.metrics().record_blog_deleted();

    tracing::info!("{} deleted blog {}", user.username, blog_id);

    Ok(StatusCode::NO_CONTENT)
}
