use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Welcome to the Bloglist API 👋
Version: {version}

Available endpoints:
  - GET    /api/blogs          - List all blogs
  - GET    /api/blogs/{{id}}     - Fetch a blog by ID
  - POST   /api/blogs          - Add a blog (Bearer token)
  - PUT    /api/blogs/{{id}}     - Update the likes of a blog
  - DELETE /api/blogs/{{id}}     - Delete your own blog (Bearer token)
  - GET    /api/stats          - Total likes, favorite blog, most active authors
  - GET    /api/users          - List users with their blogs
  - POST   /api/users          - Register a user
  - POST   /api/login          - Exchange username/password for a token
  - GET    /health             - Light health check
  - GET    /health?mode=full   - Full health check (includes storage and sessions)
  - GET    /metrics            - Prometheus metrics
"#
    )
}
