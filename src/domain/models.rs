use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored blog post and the user who owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    // ---
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,

    /// Owning user. Blogs saved before ownership was tracked have none.
    #[serde(rename = "user")]
    pub owner_id: Option<Uuid>,
}

impl Blog {
    // ---
    pub fn new(new_blog: NewBlog) -> Self {
        // ---
        Self {
            id: Uuid::new_v4(),
            title: new_blog.title,
            author: new_blog.author,
            url: new_blog.url,
            likes: new_blog.likes,
            owner_id: Some(new_blog.owner_id),
        }
    }
}

/// A validated blog ready to be persisted.
///
/// Built through [`NewBlog::parse`](crate::domain::NewBlog::parse), so every
/// instance has non-blank text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    // ---
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub owner_id: Uuid,
}

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    // ---
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,

    /// Argon2 PHC string. Never leaves the service.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Owned blogs in creation order.
    pub blog_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
}

impl User {
    // ---
    pub fn new(new_user: NewUser) -> Self {
        // ---
        Self {
            id: Uuid::new_v4(),
            username: new_user.username,
            name: new_user.name,
            password_hash: new_user.password_hash,
            blog_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Account data accepted at registration, after the password was hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    // ---
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

/// Identity established by verifying a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPrincipal {
    // ---
    pub user_id: Uuid,
    pub username: String,
}
