//! Maps `kv_common::ApiError` onto axum responses: `{status: message}`
//! bodies at the 400/404/500 split spec.md §7 defines.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kv_common::ApiError;

pub struct AppError(pub ApiError);

impl From<ApiError> for AppError {
    fn from(error: ApiError) -> Self {
        AppError(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0.to_body())).into_response()
    }
}
