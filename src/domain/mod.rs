mod authz;
mod error;
mod metrics;
mod models;
mod repository;
mod session;
mod stats;
mod validation;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Storage and session seams
pub use repository::{Repository, RepositoryPtr, RepositoryResult};
pub use session::{SessionStore, SessionStorePtr};

pub use error::{AuthError, RepositoryError, ValidationError};
pub use models::{AuthPrincipal, Blog, NewBlog, NewUser, User};
pub use validation::{
    check_likes, likes_from_stored, likes_to_stored, BlogDraft, UserDraft, ValidRegistration,
    MAX_LIKES, MIN_PASSWORD_LEN, MIN_USERNAME_LEN,
};

// Core rules: statistics and ownership
pub use authz::can_delete;
pub use stats::{
    blogs_by_author, favorite_blog, likes_by_author, most_blogs, most_likes, total_likes,
    AuthorBlogCount, AuthorLikes, BlogStats, FavoriteBlog,
};
