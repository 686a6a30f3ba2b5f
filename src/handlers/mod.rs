// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod auth;
mod blogs;
mod error;
mod health;
mod login;
mod metrics;
mod root;
mod shared_types;
mod stats;
mod users;

// Core handlers
pub use health::health_check;
pub use metrics::metrics_handler;
pub use root::root_handler;

// Blog CRUD and statistics handlers
pub use blogs::{create_blog, delete_blog, get_blog, list_blogs, update_blog};
pub use stats::blog_stats;

// User and login handlers
pub use login::login;
pub use users::{create_user, list_users};

pub use error::{ApiError, ApiResult};
