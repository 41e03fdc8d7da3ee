//! 请求提取器
//! 把 axum 默认的 JSON / 路径拒绝转换为统一的 AppError 响应

use crate::error::AppError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// `Json<T>` whose rejection is a 400 `AppError`, or 413 once the body limit is hit
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::BytesRejection(rejection))
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                Err(AppError::PayloadTooLarge)
            }
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body");
                Err(AppError::bad_request("Could not read body"))
            }
        }
    }
}

/// Book id from the `{id}` path segment
#[derive(Debug, Clone, Copy)]
pub struct BookId(pub Uuid);

impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<Uuid>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Rejected book id");
                Err(AppError::bad_request("Invalid book id"))
            }
        }
    }
}
