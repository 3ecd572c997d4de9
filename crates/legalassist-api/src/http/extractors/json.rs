//! JSON body extractor whose rejection is a 400 validation error.
//!
//! axum's own `Json` rejects with 415/422 and a plain-text body; the API
//! reports every unusable body as `VALIDATION_ERROR` instead.

use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::http::error::AppError;

/// Drop-in replacement for `axum::Json` in handler arguments.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}
