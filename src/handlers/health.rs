use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(serde::Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
pub struct HealthQuery {
    mode: Option<String>,
}

/// Responds with the health status of the server.
///
/// - By default (no query parameters), performs a light check to confirm the web server
///   is running.
///
/// - If `mode=full` is passed as a query parameter, also round-trips to the
///   repository and the session store.
///
/// # Responses
/// - `200 OK` with `{ "status": "ok" }` if the server (and backends, in full mode) are healthy.
/// - `500 INTERNAL SERVER ERROR` with `{ "status": "error" }` if a backend check fails.
pub async fn health_check(
    State(state): State<AppState>,
    Query(params): Query<HealthQuery>,
) -> (StatusCode, Json<HealthResponse>) {
    match params.mode.as_deref() {
        Some("full") => {
            let (repo, sessions) =
                futures::join!(state.repository().ping(), state.sessions().ping());

            if let Err(err) = &repo {
                tracing::error!("Repository health check failed: {}", err);
            }
            if let Err(err) = &sessions {
                tracing::error!("Session store health check failed: {}", err);
            }

            if repo.is_ok() && sessions.is_ok() {
                (StatusCode::OK, Json(HealthResponse { status: "ok" }))
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(HealthResponse { status: "error" }),
                )
            }
        }
        _ => {
            // Light health check
            (StatusCode::OK, Json(HealthResponse { status: "ok" }))
        }
    }
}
