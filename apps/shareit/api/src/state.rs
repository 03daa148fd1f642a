//! Application state management.
//!
//! The state holds the configuration and, when running on PostgreSQL, the
//! connection pool shared by every repository.

use sea_orm::DatabaseConnection;

/// Shared application state.
///
/// Cloning is cheap: the connection is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// `None` when running with `STORAGE=memory`
    pub db: Option<DatabaseConnection>,
}
