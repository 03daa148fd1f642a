use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
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

use crate::error::ItemResult;
use crate::models::{
    BookingSummary, CommentView, CreateComment, CreateItem, Item, ItemView, SearchQuery,
    UpdateItem,
};
use crate::repository::ItemRepository;
use crate::service::ItemService;

pub const TAG: &str = "items";

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(create_item, owner_items, search_items, get_item, update_item, add_comment),
    components(
        schemas(
            Item,
            ItemView,
            CreateItem,
            UpdateItem,
            BookingSummary,
            CommentView,
            CreateComment
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestHeaderResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Items offered for lending, search and comments")
    )
)]
pub struct ApiDoc;

/// Create the items router
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(owner_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", post(add_comment))
        .with_state(shared_service)
}

/// List an item for lending
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = Uuid, Header, description = "Owner id")),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// The caller's items in listing order
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Owner id"),
        Pagination
    ),
    responses(
        (status = 200, description = "Own items with bookings and comments", body = Vec<ItemView>),
        (status = 400, response = BadRequestHeaderResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn owner_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    page: Pagination,
) -> ItemResult<Json<Vec<ItemView>>> {
    let items = service
        .owner_items(user_id, page.offset(), page.limit())
        .await?;
    Ok(Json(items))
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchQuery, Pagination),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Query(query): Query<SearchQuery>,
    page: Pagination,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service
        .search(&query.text, page.offset(), page.limit())
        .await?;
    Ok(Json(items))
}

/// Get an item with its comments
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Caller id"),
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found; bookings are shown to the owner only", body = ItemView),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    UuidPath(id): UuidPath,
) -> ItemResult<Json<ItemView>> {
    let item = service.get_item(user_id, id).await?;
    Ok(Json(item))
}

/// Partially update an item (owner only)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Owner id"),
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<Item>> {
    let item = service.update_item(user_id, id, input).await?;
    Ok(Json(item))
}

/// Comment on a borrowed item
#[utoipa::path(
    post,
    path = "/{id}/comment",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Author id"),
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 200, description = "Comment added", body = CommentView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_comment<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> ItemResult<Json<CommentView>> {
    let comment = service.add_comment(user_id, id, input).await?;
    Ok(Json(comment))
}
