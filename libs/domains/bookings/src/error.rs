use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_items::ItemError;
use domain_users::UserError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::BookingStatus;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking {0} not found")]
    NotFound(Uuid),

    /// Caller is neither the booker nor the owner; reported as not found
    #[error("Booking {booking_id} not found for user {user_id}")]
    NotParty { booking_id: Uuid, user_id: Uuid },

    /// Only the item owner may approve or reject; reported as not found
    #[error("Booking {booking_id} not found for owner {user_id}")]
    NotOwner { booking_id: Uuid, user_id: Uuid },

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Item {0} not found")]
    ItemNotFound(Uuid),

    /// Owners cannot book their own items; reported as not found
    #[error("Item {0} not found for booking by its owner")]
    OwnItem(Uuid),

    #[error("Item {0} is not available")]
    Unavailable(Uuid),

    #[error("Booking is already {}", .0.label())]
    AlreadyDecided(BookingStatus),

    #[error("Unknown state: UNSUPPORTED_STATUS")]
    UnknownState(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<UserError> for BookingError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => BookingError::UserNotFound(id),
            UserError::Database(e) => BookingError::Database(e),
            other => BookingError::Internal(other.to_string()),
        }
    }
}

impl From<ItemError> for BookingError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => BookingError::ItemNotFound(id),
            ItemError::UserNotFound(id) => BookingError::UserNotFound(id),
            ItemError::Database(e) => BookingError::Database(e),
            other => BookingError::Internal(other.to_string()),
        }
    }
}

/// Used when the booking repositories answer history lookups for items
impl From<BookingError> for ItemError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Database(e) => ItemError::Database(e),
            other => ItemError::Internal(other.to_string()),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(_)
            | BookingError::NotParty { .. }
            | BookingError::NotOwner { .. }
            | BookingError::UserNotFound(_)
            | BookingError::ItemNotFound(_)
            | BookingError::OwnItem(_) => AppError::NotFound(err.to_string()),
            BookingError::Unavailable(_)
            | BookingError::AlreadyDecided(_)
            | BookingError::UnknownState(_) => AppError::BadRequest(err.to_string()),
            BookingError::Validation(msg) => AppError::BadRequest(msg),
            BookingError::Database(e) => AppError::Database(e),
            BookingError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
