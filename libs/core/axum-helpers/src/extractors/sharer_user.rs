//! Caller identity taken from the `X-Sharer-User-Id` header.

use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

pub const SHARER_USER_HEADER: &str = "X-Sharer-User-Id";

/// Id of the user on whose behalf the request is made.
///
/// There is no authentication layer; the header is trusted as-is. A missing
/// or non-UUID value is rejected with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerUserId(pub Uuid);

impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(SHARER_USER_HEADER).ok_or_else(|| {
            AppError::InvalidHeader(format!("Missing required header {}", SHARER_USER_HEADER))
        })?;

        value
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .map(SharerUserId)
            .ok_or_else(|| {
                AppError::InvalidHeader(format!("Header {} must be a UUID", SHARER_USER_HEADER))
            })
    }
}
