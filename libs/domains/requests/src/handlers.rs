use axum::{
    Json, Router,
    extract::State,
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

use crate::error::RequestResult;
use crate::models::{CreateItemRequest, ItemRequestView, RequestedItem};
use crate::repository::ItemRequestRepository;
use crate::service::RequestService;

pub const TAG: &str = "requests";

/// OpenAPI documentation for Item Requests API
#[derive(OpenApi)]
#[openapi(
    paths(create_request, own_requests, other_requests, get_request),
    components(
        schemas(CreateItemRequest, ItemRequestView, RequestedItem),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestHeaderResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Requests for items nobody lists yet")
    )
)]
pub struct ApiDoc;

/// Create the item requests router
pub fn router<R: ItemRequestRepository + 'static>(service: RequestService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(own_requests).post(create_request))
        .route("/all", get(other_requests))
        .route("/{id}", get(get_request))
        .with_state(shared_service)
}

/// Post a new item request
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = Uuid, Header, description = "Caller id")),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Request created", body = ItemRequestView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_request<R: ItemRequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateItemRequest>,
) -> RequestResult<impl IntoResponse> {
    let request = service.create_request(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// The caller's own requests, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = Uuid, Header, description = "Caller id")),
    responses(
        (status = 200, description = "Own requests with their items", body = Vec<ItemRequestView>),
        (status = 400, response = BadRequestHeaderResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn own_requests<R: ItemRequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerUserId(user_id): SharerUserId,
) -> RequestResult<Json<Vec<ItemRequestView>>> {
    let requests = service.own_requests(user_id).await?;
    Ok(Json(requests))
}

/// Requests posted by other users, newest first
#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Caller id"),
        Pagination
    ),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<ItemRequestView>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn other_requests<R: ItemRequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerUserId(user_id): SharerUserId,
    page: Pagination,
) -> RequestResult<Json<Vec<ItemRequestView>>> {
    let requests = service
        .other_requests(user_id, page.offset(), page.limit())
        .await?;
    Ok(Json(requests))
}

/// Get one request with its items
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Caller id"),
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request found", body = ItemRequestView),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_request<R: ItemRequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerUserId(user_id): SharerUserId,
    UuidPath(id): UuidPath,
) -> RequestResult<Json<ItemRequestView>> {
    let request = service.get_request(user_id, id).await?;
    Ok(Json(request))
}
