use crate::app_state::AppState;
use crate::domain::BlogStats;
use crate::handlers::error::ApiResult;
use crate::handlers::shared_types::ApiResponse;
use axum::extract::State;

/// Handler for blog statistics (GET /api/stats).
///
/// Computes every aggregate over one snapshot of the blog list. Statistics
/// with no data (an empty list) are reported as `null`.
#[tracing::instrument(skip(state))]
pub async fn blog_stats(State(state): State<AppState>) -> ApiResult<ApiResponse<BlogStats>> {
    // ---
    let blogs = state.repository().fetch_all_blogs().await?;

    Ok(ApiResponse {
        data: BlogStats::compute(&blogs),
    })
}
