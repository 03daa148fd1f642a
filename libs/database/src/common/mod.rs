//! Helpers shared by every backend

pub mod error;
pub mod retry;

#[cfg(feature = "postgres")]
pub use error::{is_foreign_key_violation, is_unique_violation};
pub use error::{DatabaseError, DatabaseResult};
pub use retry::{RetryConfig, retry, retry_with_backoff};
