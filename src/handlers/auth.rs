use crate::app_state::AppState;
use crate::domain::{AuthError, AuthPrincipal};
use crate::handlers::error::ApiError;
use axum::http::{header::AUTHORIZATION, HeaderMap};

/// Extracts and verifies the bearer token from the Authorization header.
///
/// Expects header format: "Authorization: Bearer <token>"
///
/// # Errors
///
/// Returns UNAUTHORIZED if:
/// - Authorization header is missing
/// - Header format is invalid (not "Bearer <token>")
/// - Token is unknown or expired
///
/// Returns INTERNAL_SERVER_ERROR if the session store is unreachable.
pub(crate) async fn extract_principal(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<AuthPrincipal, ApiError> {
    // ---
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| {
            // ---
            tracing::debug!("Missing Authorization header");
            AuthError::MissingToken
        })?
        .to_str()
        .map_err(|_| {
            // ---
            tracing::debug!("Invalid Authorization header format");
            AuthError::InvalidToken
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            // ---
            tracing::debug!("Authorization header missing Bearer prefix");
            AuthError::MissingToken
        })?;

    Ok(state.sessions().verify(token).await?)
}
