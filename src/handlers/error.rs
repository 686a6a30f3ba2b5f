//! HTTP error type shared by all handlers.

use crate::domain::{AuthError, RepositoryError, ValidationError};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed ingestion checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request body or path could not be read.
    #[error("{0}")]
    BadRequest(String),

    /// Missing, malformed, unknown or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to touch this resource.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        // ---
        match err {
            RepositoryError::DuplicateUsername(_) => ApiError::Conflict(err.to_string()),
            RepositoryError::Invalid(inner) => ApiError::Validation(inner),
            RepositoryError::CorruptRecord(_) => ApiError::Internal(err.into()),
            RepositoryError::Backend(inner) => ApiError::Internal(inner),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        // ---
        match err {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::InvalidCredentials => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::Backend(inner) => ApiError::Internal(inner),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // ---
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let status = match &self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(err) => {
                tracing::error!("Request failed: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Type alias for handler results
pub type ApiResult<T> = Result<T, ApiError>;
