use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Wrapper type for successful API responses.
///
/// Serializes as `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        axum::Json(self).into_response()
    }
}
