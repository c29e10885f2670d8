//! Request extractors that reject with [`ApiError`].
//!
//! The stock `Path` and `Json` extractors answer a bad id or an unreadable
//! body with plain text. These wrappers keep every failure in the JSON error
//! shape.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use headcount_core::SiteId;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Record id taken from the `:id` path segment.
///
/// ```rust,ignore
/// async fn get_site(SiteIdPath(id): SiteIdPath) -> ApiResult<Json<SiteLocation>> {
///     // id is a valid i32
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteIdPath(pub SiteId);

#[async_trait]
impl<S> FromRequestParts<S> for SiteIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<SiteId> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::invalid_input(format!("Invalid record ID: {}", e.body_text()))
                    .with_details(serde_json::json!({
                        "reason": "invalid record id",
                        "path": parts.uri.path(),
                    }))
            })?;

        Ok(SiteIdPath(id))
    }
}

/// JSON request body.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ApiError::invalid_input(format!("Invalid request body: {}", e.body_text()))
                .with_details(serde_json::json!({ "reason": "invalid request body" }))
        })?;

        Ok(ApiJson(value))
    }
}
