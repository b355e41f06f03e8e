//! UUID path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Extracts a `{id}` path segment as a [`Uuid`], rejecting malformed
/// values with a structured 400 instead of axum's plain-text rejection.
///
/// ```ignore
/// async fn get_product(UuidPath(id): UuidPath) -> ... { ... }
///
/// Router::new().route("/products/{id}", get(get_product));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Uuid::parse_str(&raw).map(UuidPath).map_err(|_| {
            AppError::BadRequest(format!("Invalid UUID: {}", raw)).into_response()
        })
    }
}
