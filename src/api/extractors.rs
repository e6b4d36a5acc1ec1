//! Custom request extractors.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::error::AppError;

/// `Json<T>` whose rejection is an [`AppError`].
///
/// Without it a malformed body or a missing `Content-Type: application/json` header
/// would come back as axum's plain-text rejection instead of the JSON error shape.
///
/// ```rust,ignore
/// async fn handler(AppJson(payload): AppJson<ShortenRequest>) -> ... { }
/// ```
#[derive(Debug, Clone)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
