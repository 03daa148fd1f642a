use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    Pagination, SharerUserId, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestHeaderResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::BookingResult;
use crate::models::{
    BookedItem, Booker, BookingStatus, BookingView, CreateBooking, Decision, StateQuery,
};
use crate::repository::BookingRepository;
use crate::service::BookingService;

pub const TAG: &str = "bookings";

/// OpenAPI documentation for Bookings API
#[derive(OpenApi)]
#[openapi(
    paths(create_booking, respond, get_booking, booker_bookings, owner_bookings),
    components(
        schemas(BookingView, BookingStatus, BookedItem, Booker, CreateBooking),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestHeaderResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Booking lifecycle and listings")
    )
)]
pub struct ApiDoc;

/// Create the bookings router
pub fn router<R: BookingRepository + 'static>(service: BookingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(booker_bookings).post(create_booking))
        .route("/owner", get(owner_bookings))
        .route("/{id}", get(get_booking).patch(respond))
        .with_state(shared_service)
}

/// Book an item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = Uuid, Header, description = "Booker id")),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created in WAITING state", body = BookingView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> BookingResult<impl IntoResponse> {
    let booking = service.create_booking(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Approve or reject a booking (item owner only)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Item owner id"),
        ("id" = Uuid, Path, description = "Booking ID"),
        Decision
    ),
    responses(
        (status = 200, description = "Booking approved or rejected", body = BookingView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn respond<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    UuidPath(id): UuidPath,
    Query(decision): Query<Decision>,
) -> BookingResult<Json<BookingView>> {
    let booking = service.respond(user_id, id, decision.approved).await?;
    Ok(Json(booking))
}

/// Get a booking as its booker or item owner
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Booker or item owner id"),
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = BookingView),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    UuidPath(id): UuidPath,
) -> BookingResult<Json<BookingView>> {
    let booking = service.get_booking(user_id, id).await?;
    Ok(Json(booking))
}

/// The caller's bookings, latest start first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Booker id"),
        StateQuery,
        Pagination
    ),
    responses(
        (status = 200, description = "Bookings made by the caller", body = Vec<BookingView>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn booker_bookings<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<StateQuery>,
    page: Pagination,
) -> BookingResult<Json<Vec<BookingView>>> {
    let bookings = service
        .booker_bookings(
            user_id,
            query.state.as_deref(),
            page.offset(),
            page.limit(),
        )
        .await?;
    Ok(Json(bookings))
}

/// Bookings of the caller's items, latest start first
#[utoipa::path(
    get,
    path = "/owner",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Item owner id"),
        StateQuery,
        Pagination
    ),
    responses(
        (status = 200, description = "Bookings of the caller's items", body = Vec<BookingView>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn owner_bookings<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<StateQuery>,
    page: Pagination,
) -> BookingResult<Json<Vec<BookingView>>> {
    let bookings = service
        .owner_bookings(
            user_id,
            query.state.as_deref(),
            page.offset(),
            page.limit(),
        )
        .await?;
    Ok(Json(bookings))
}
