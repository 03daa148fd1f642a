use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_users::UserError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Request {0} not found")]
    NotFound(Uuid),

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RequestResult<T> = Result<T, RequestError>;

impl From<UserError> for RequestError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => RequestError::UserNotFound(id),
            UserError::Database(e) => RequestError::Database(e),
            other => RequestError::Internal(other.to_string()),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::NotFound(_) | RequestError::UserNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            RequestError::Validation(msg) => AppError::BadRequest(msg),
            RequestError::Database(e) => AppError::Database(e),
            RequestError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
