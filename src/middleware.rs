//! Request instrumentation applied to every route.

use crate::app_state::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// Records duration and status of each request with the configured metrics.
///
/// The route template (e.g. `/api/blogs/{id}`) is used as the path label so
/// ids do not explode label cardinality.
pub(crate) async fn track_requests(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    // ---
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;
    let status = response.status().as_u16();

    tracing::debug!("{} {} -> {} in {:?}", method, path, status, start.elapsed());
    state
        .metrics()
        .record_http_request(start, &path, &method, status);

    response
}
