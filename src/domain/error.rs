//! Typed errors shared by the domain and its collaborators.
//!
//! Missing records, rejected input, and failed ownership checks are kept as
//! separate kinds so the HTTP layer can answer each with its own status.

use thiserror::Error;

/// Malformed or missing input detected at ingestion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("`{0}` is required")]
    MissingField(&'static str),

    /// A field is shorter than allowed.
    #[error("`{field}` must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },

    /// A field does not match its allowed format.
    #[error("`{field}` is invalid: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// A likes count does not fit the storable range.
    #[error("`likes` must be at most {max}, got {0}", max = i64::MAX)]
    LikesOutOfRange(u64),

    /// A stored likes count was negative.
    #[error("`likes` must be a non-negative integer, got {0}")]
    NegativeLikes(i64),
}

/// Failures reported by a [`Repository`](crate::domain::Repository).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("username `{0}` is already taken")]
    DuplicateUsername(String),

    /// Input the store cannot hold.
    #[error("rejected by storage: {0}")]
    Invalid(ValidationError),

    /// A persisted record failed validation when it was read back.
    #[error("stored record is invalid: {0}")]
    CorruptRecord(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Failures reported while authenticating a request.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
