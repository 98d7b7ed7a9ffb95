//! Purpose: a `Json<T>` extractor that answers a malformed or
//! missing-field request body with 400 instead of axum's default 422
//! (`JsonRejection::JsonDataError`), matching the "bad request" status
//! the original's `api.Bad` maps every malformed-body case to.

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use kv_common::ApiError;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Drop-in replacement for `axum::Json<T>` as a handler argument; every
/// rejection (invalid UTF-8, malformed JSON, missing/mistyped fields,
/// missing content-type) becomes `ApiError::BadRequest`.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidatedJson(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.to_string()).into()),
        }
    }
}
