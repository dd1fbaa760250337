//! Request extractors.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use fleetdesk_core::AppError;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body whose rejections surface as `Validation` errors with the
/// standard `{message}` payload.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection_to_error(rejection).into()),
        }
    }
}

/// Path parameters that must parse into identifiers.
///
/// A segment that cannot parse names nothing that exists, so the rejection
/// surfaces as `NotFound` with the standard `{message}` payload.
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection_to_error(rejection).into()),
        }
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    AppError::Validation(format!("invalid request body: {}", rejection.body_text()))
}

fn path_rejection_to_error(rejection: PathRejection) -> AppError {
    AppError::NotFound(format!("no resource at this path: {}", rejection.body_text()))
}
