//! `from`/`size` pagination query parameters.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Page window requested by the client.
///
/// `from` is the index of the first wanted element and `size` the page
/// length. Results are served in whole pages, so `from` is rounded down to
/// a multiple of `size`: `from=15&size=10` returns elements 10..20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Index of the first element, >= 0 (default 0)
    #[serde(default)]
    pub from: i64,
    /// Page length, > 0 (default 10)
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(from: i64, size: i64) -> Result<Self, AppError> {
        if from < 0 {
            return Err(AppError::BadRequest(
                "Parameter 'from' must not be negative".to_string(),
            ));
        }
        if size <= 0 {
            return Err(AppError::BadRequest(
                "Parameter 'size' must be positive".to_string(),
            ));
        }
        Ok(Self { from, size })
    }

    pub fn offset(&self) -> usize {
        ((self.from / self.size) * self.size) as usize
    }

    pub fn limit(&self) -> usize {
        self.size as usize
    }
}

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<Pagination>::from_request_parts(parts, state).await?;
        Pagination::new(raw.from, raw.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> Result<Pagination, AppError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Pagination::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_defaults_when_absent() {
        let page = extract("/bookings").await.unwrap();
        assert_eq!(page, Pagination::default());
        assert_eq!((page.offset(), page.limit()), (0, 10));
    }

    #[tokio::test]
    async fn test_offset_is_page_aligned() {
        let page = extract("/bookings?from=15&size=10").await.unwrap();
        assert_eq!(page.offset(), 10);
        assert_eq!(page.limit(), 10);

        let page = extract("/bookings?from=2&size=3").await.unwrap();
        assert_eq!(page.offset(), 0);
    }

    #[tokio::test]
    async fn test_negative_from_is_rejected() {
        assert!(matches!(
            extract("/bookings?from=-1&size=10").await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_zero_size_is_rejected() {
        assert!(matches!(
            extract("/bookings?from=0&size=0").await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_non_numeric_is_rejected() {
        assert!(matches!(
            extract("/bookings?size=ten").await,
            Err(AppError::QueryRejection(_))
        ));
    }
}
