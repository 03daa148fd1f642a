//! Bookings Domain
//!
//! Reservations of items for a time window. A booking starts out WAITING
//! and the item owner answers it exactly once with APPROVED or REJECTED.
//! Lists can be filtered by a state relative to the current time (CURRENT,
//! PAST, FUTURE) or by status (WAITING, REJECTED).
//!
//! The repositories here also implement [`domain_items::BookingHistory`],
//! which is how item views learn their last and next bookings and how
//! comment eligibility is checked.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/bookings)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌────────────────────────────────┐
//! │   Service   │ ──► │ UserRepository, ItemRepository │
//! └──────┬──────┘     └────────────────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← in-memory or PostgreSQL, status changes are compare-and-set
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BookingError, BookingResult};
pub use models::{Booking, BookingState, BookingStatus, BookingView, CreateBooking};
pub use postgres::PgBookingRepository;
pub use repository::{BookingRepository, InMemoryBookingRepository, Party};
pub use service::BookingService;
