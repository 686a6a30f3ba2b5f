//! Username/password login that hands out bearer tokens.

use crate::app_state::AppState;
use crate::domain::AuthError;
use crate::handlers::error::{ApiError, ApiResult};
use crate::handlers::shared_types::ApiResponse;
use crate::infrastructure::verify_password;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    // ---
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    // ---
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

/// POST /api/login
///
/// Checks the credentials and starts a session. Send the returned token as
/// `Authorization: Bearer <token>` on requests that need a user.
///
/// An unknown username and a wrong password both yield `401 Unauthorized`
/// with the same message.
#[tracing::instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<LoginResponse>> {
    // ---
    let Json(request) = body?;

    let user = state
        .repository()
        .fetch_user_by_username(&request.username)
        .await?;

    let Some(user) = user else {
        tracing::debug!("Login for unknown user {}", request.username);
        return Err(AuthError::InvalidCredentials.into());
    };

    let password_hash = user.password_hash.clone();
    let password = request.password;
    let matches =
        tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;

    if !matches {
        tracing::debug!("Wrong password for user {}", user.username);
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.sessions().issue(&user).await?;

    Ok(ApiResponse {
        data: LoginResponse {
            token,
            username: user.username,
            name: user.name,
        },
    })
}
