//! Item Requests Domain
//!
//! Users post requests for things nobody lists yet. Owners can later list
//! an item "in answer" to a request; those items are looked up through the
//! [`RequestedItems`] port, which the items domain implements.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/requests)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌────────────────┐
//! │   Service   │ ──► │ RequestedItems │  ← implemented by domain_items
//! └──────┬──────┘     └────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← In-memory or PostgreSQL
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{RequestError, RequestResult};
pub use models::{CreateItemRequest, ItemRequest, ItemRequestView, RequestedItem};
pub use postgres::PgItemRequestRepository;
pub use repository::{InMemoryItemRequestRepository, ItemRequestRepository, RequestedItems};
pub use service::RequestService;
