//! Custom extractors for Axum handlers.
//!
//! Each one rejects with [`AppError`](crate::errors::AppError), so every
//! malformed request gets the same JSON error envelope.

pub mod pagination;
pub mod sharer_user;
pub mod uuid_path;
pub mod validated_json;

pub use pagination::Pagination;
pub use sharer_user::{SHARER_USER_HEADER, SharerUserId};
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
