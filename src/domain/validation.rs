//! Ingestion checks for blogs and user registrations.
//!
//! Everything that reaches the aggregator has passed through here, so the
//! statistics code can assume well-formed numeric likes.

use super::error::ValidationError;
use super::models::NewBlog;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;

/// Minimum username length accepted at registration.
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 3;

/// Largest likes count accepted; the range of a PostgreSQL `BIGINT`.
pub const MAX_LIKES: u64 = i64::MAX as u64;

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    // ---
    Regex::new(r"^[A-Za-z0-9_.-]+$").expect("username regex is valid")
});

/// Blog fields as submitted by a client, before validation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BlogDraft {
    // ---
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

/// Registration fields as submitted by a client, before validation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserDraft {
    // ---
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// A registration that passed validation. The password is still plaintext.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    // ---
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

impl NewBlog {
    // ---
    /// Validates a draft and binds it to its owner.
    ///
    /// Absent `likes` defaults to zero.
    pub fn parse(draft: BlogDraft, owner_id: Uuid) -> Result<Self, ValidationError> {
        // ---
        Ok(Self {
            title: required("title", draft.title)?,
            author: required("author", draft.author)?,
            url: required("url", draft.url)?,
            likes: check_likes(draft.likes.unwrap_or(0))?,
            owner_id,
        })
    }
}

impl UserDraft {
    // ---
    pub fn validate(self) -> Result<ValidRegistration, ValidationError> {
        // ---
        let username = required("username", self.username)?;
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(ValidationError::TooShort {
                field: "username",
                min: MIN_USERNAME_LEN,
            });
        }
        if !USERNAME_REGEX.is_match(&username) {
            return Err(ValidationError::InvalidFormat {
                field: "username",
                reason: "only letters, digits, '_', '.' and '-' are allowed",
            });
        }

        // Passwords are taken verbatim; surrounding whitespace is significant.
        let password = match self.password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(ValidationError::MissingField("password")),
        };
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::TooShort {
                field: "password",
                min: MIN_PASSWORD_LEN,
            });
        }

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(ValidRegistration {
            username,
            name,
            password,
        })
    }
}

/// Accepts a likes count from a client if it fits in [`MAX_LIKES`].
pub fn check_likes(likes: u64) -> Result<u64, ValidationError> {
    // ---
    if likes > MAX_LIKES {
        return Err(ValidationError::LikesOutOfRange(likes));
    }
    Ok(likes)
}

/// Converts a likes count for storage as a `BIGINT`.
pub fn likes_to_stored(likes: u64) -> Result<i64, ValidationError> {
    // ---
    i64::try_from(likes).map_err(|_| ValidationError::LikesOutOfRange(likes))
}

/// Converts a likes count read from storage, rejecting negative values.
pub fn likes_from_stored(raw: i64) -> Result<u64, ValidationError> {
    // ---
    u64::try_from(raw).map_err(|_| ValidationError::NegativeLikes(raw))
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    // ---
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}
