//! Items Domain
//!
//! Things users offer for lending, the comments borrowers leave on them and
//! free-text search over what is currently available.
//!
//! Booking data is owned by the bookings domain; this crate only sees it
//! through the [`BookingHistory`] port (last/next booking of an item and
//! "has this user finished a booking of it"). In the other direction the
//! repositories here implement [`domain_requests::RequestedItems`] so that
//! requests can show the items listed in answer to them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/items)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌────────────────┐
//! │   Service   │ ──► │ BookingHistory │  ← implemented by domain_bookings
//! └──────┬──────┘     └────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← items + comments, in-memory or PostgreSQL
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use models::{
    BookingSummary, Comment, CommentView, CreateComment, CreateItem, Item, ItemView, SearchQuery,
    UpdateItem,
};
pub use postgres::PgItemRepository;
pub use repository::{BookingHistory, InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
