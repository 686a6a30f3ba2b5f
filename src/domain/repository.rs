use super::error::RepositoryError;
use super::models::{Blog, NewBlog, NewUser, User};
use std::sync::Arc;
use uuid::Uuid;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Abstraction for blog and user persistence.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    // ---
    /// All blogs, oldest first.
    async fn fetch_all_blogs(&self) -> RepositoryResult<Vec<Blog>>;

    /// Get blog by ID.
    async fn fetch_blog_by_id(&self, blog_id: Uuid) -> RepositoryResult<Option<Blog>>;

    /// Save a new blog and append it to its owner's blog list.
    async fn create_blog(&self, new_blog: NewBlog) -> RepositoryResult<Blog>;

    /// Set the likes of a blog. Returns `None` if the blog does not exist.
    async fn update_blog_likes(&self, blog_id: Uuid, likes: u64) -> RepositoryResult<Option<Blog>>;

    /// Delete a blog by ID. Returns `false` if nothing was deleted.
    async fn delete_blog_by_id(&self, blog_id: Uuid) -> RepositoryResult<bool>;

    /// Create a new user. Fails with `DuplicateUsername` if the name is taken.
    async fn create_user(&self, new_user: NewUser) -> RepositoryResult<User>;

    /// Get user by ID.
    async fn fetch_user_by_id(&self, user_id: Uuid) -> RepositoryResult<Option<User>>;

    /// Get user by username.
    async fn fetch_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    /// All users, oldest first.
    async fn fetch_all_users(&self) -> RepositoryResult<Vec<User>>;

    /// Cheap round trip to the backing store, used by the full health check.
    async fn ping(&self) -> RepositoryResult<()>;
}

/// Type alias for any backend that implements Repository.
pub type RepositoryPtr = Arc<dyn Repository>;
