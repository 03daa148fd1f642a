use axum::Router;
use domain_bookings::{
    BookingRepository, BookingService, InMemoryBookingRepository, PgBookingRepository,
};
use domain_items::{
    BookingHistory, InMemoryItemRepository, ItemRepository, ItemService, PgItemRepository,
};
use domain_requests::{
    InMemoryItemRequestRepository, ItemRequestRepository, PgItemRequestRepository,
    RequestService, RequestedItems,
};
use domain_users::{
    InMemoryUserRepository, PgUserRepository, UserReferences, UserRepository, UserService,
};
use std::sync::Arc;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    match &state.db {
        Some(db) => compose(
            PgUserRepository::new(db.clone()),
            PgItemRequestRepository::new(db.clone()),
            PgItemRepository::new(db.clone()),
            PgBookingRepository::new(db.clone()),
        ),
        None => compose(
            InMemoryUserRepository::new(),
            InMemoryItemRequestRepository::new(),
            InMemoryItemRepository::new(),
            InMemoryBookingRepository::new(),
        ),
    }
}

/// Wire the four domains together.
///
/// Each repository is cloned into the services that read it; clones share
/// the same pool or in-memory map.
fn compose<U, Q, I, B>(users: U, requests: Q, items: I, bookings: B) -> Router
where
    U: UserRepository + Clone + 'static,
    Q: ItemRequestRepository + UserReferences + Clone + 'static,
    I: ItemRepository + RequestedItems + UserReferences + Clone + 'static,
    B: BookingRepository + BookingHistory + UserReferences + Clone + 'static,
{
    let user_lookup: Arc<dyn UserRepository> = Arc::new(users.clone());

    let holders: Vec<Arc<dyn UserReferences>> = vec![
        Arc::new(requests.clone()),
        Arc::new(items.clone()),
        Arc::new(bookings.clone()),
    ];

    let user_service = UserService::new(users).with_references(holders);
    let request_service = RequestService::new(
        requests.clone(),
        user_lookup.clone(),
        Arc::new(items.clone()),
    );
    let item_service = ItemService::new(
        items.clone(),
        user_lookup.clone(),
        Arc::new(requests),
        Arc::new(bookings.clone()),
    );
    let booking_service = BookingService::new(bookings, user_lookup, Arc::new(items));

    Router::new()
        .nest("/users", domain_users::handlers::router(user_service))
        .nest("/items", domain_items::handlers::router(item_service))
        .nest("/bookings", domain_bookings::handlers::router(booking_service))
        .nest("/requests", domain_requests::handlers::router(request_service))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
