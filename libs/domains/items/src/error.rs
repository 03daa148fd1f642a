use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_requests::RequestError;
use domain_users::UserError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item {0} not found")]
    NotFound(Uuid),

    /// Only the owner may modify an item; reported as not found
    #[error("Item {item_id} not found for user {user_id}")]
    NotOwner { item_id: Uuid, user_id: Uuid },

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Request {0} not found")]
    RequestNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<UserError> for ItemError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => ItemError::UserNotFound(id),
            UserError::Database(e) => ItemError::Database(e),
            other => ItemError::Internal(other.to_string()),
        }
    }
}

impl From<RequestError> for ItemError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::NotFound(id) => ItemError::RequestNotFound(id),
            RequestError::UserNotFound(id) => ItemError::UserNotFound(id),
            RequestError::Database(e) => ItemError::Database(e),
            other => ItemError::Internal(other.to_string()),
        }
    }
}

/// Used when the item repositories answer lookups for the requests domain
impl From<ItemError> for RequestError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::Database(e) => RequestError::Database(e),
            other => RequestError::Internal(other.to_string()),
        }
    }
}

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(_)
            | ItemError::NotOwner { .. }
            | ItemError::UserNotFound(_)
            | ItemError::RequestNotFound(_) => AppError::NotFound(err.to_string()),
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::Database(e) => AppError::Database(e),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
