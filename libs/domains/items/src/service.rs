//! Item Service - Business logic layer

use chrono::Utc;
use domain_requests::ItemRequestRepository;
use domain_users::UserRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{Comment, CommentView, CreateComment, CreateItem, Item, ItemView, UpdateItem};
use crate::repository::{BookingHistory, ItemRepository};

/// Item service: listing, editing, search and comments
///
/// Users, requests and booking history live in other domains and are
/// reached through the injected trait objects.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserRepository>,
    requests: Arc<dyn ItemRequestRepository>,
    bookings: Arc<dyn BookingHistory>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(
        repository: R,
        users: Arc<dyn UserRepository>,
        requests: Arc<dyn ItemRequestRepository>,
        bookings: Arc<dyn BookingHistory>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            requests,
            bookings,
        }
    }

    /// List a new item owned by `owner_id`
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, owner_id: Uuid, input: CreateItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.users
            .get_by_id(owner_id)
            .await?
            .ok_or(ItemError::UserNotFound(owner_id))?;

        if let Some(request_id) = input.request_id {
            self.requests
                .get_by_id(request_id)
                .await?
                .ok_or(ItemError::RequestNotFound(request_id))?;
        }

        self.repository.create(Item::new(owner_id, input)).await
    }

    /// Owner-only partial update
    #[instrument(skip(self, input))]
    pub async fn update_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        input: UpdateItem,
    ) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let mut item = self.find_item(item_id).await?;
        if item.owner_id != user_id {
            return Err(ItemError::NotOwner { item_id, user_id });
        }

        item.apply_update(input);
        self.repository.update(item).await
    }

    /// Item with its comments; booking neighbours only for the owner
    #[instrument(skip(self))]
    pub async fn get_item(&self, user_id: Uuid, item_id: Uuid) -> ItemResult<ItemView> {
        let item = self.find_item(item_id).await?;

        let comments = self
            .repository
            .comments_for_items(vec![item_id])
            .await?
            .into_iter()
            .map(CommentView::from)
            .collect();

        if item.owner_id == user_id {
            self.owner_view(item, comments).await
        } else {
            Ok(item.into_view(comments, None, None))
        }
    }

    /// The caller's items in listing order, with bookings and comments
    #[instrument(skip(self))]
    pub async fn owner_items(
        &self,
        user_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> ItemResult<Vec<ItemView>> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(ItemError::UserNotFound(user_id))?;

        let items = self
            .repository
            .list_by_owner(user_id, offset, limit)
            .await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let ids = items.iter().map(|i| i.id).collect();
        let mut comments: HashMap<Uuid, Vec<CommentView>> = HashMap::new();
        for comment in self.repository.comments_for_items(ids).await? {
            comments
                .entry(comment.item_id)
                .or_default()
                .push(comment.into());
        }

        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let item_comments = comments.remove(&item.id).unwrap_or_default();
            views.push(self.owner_view(item, item_comments).await?);
        }
        Ok(views)
    }

    /// Available items matching `text`; blank text matches nothing
    #[instrument(skip(self))]
    pub async fn search(&self, text: &str, offset: usize, limit: usize) -> ItemResult<Vec<Item>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        self.repository
            .search(text.to_string(), offset, limit)
            .await
    }

    /// Comment on an item the author has finished borrowing
    #[instrument(skip(self, input))]
    pub async fn add_comment(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        input: CreateComment,
    ) -> ItemResult<CommentView> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let item = self.find_item(item_id).await?;
        let author = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(ItemError::UserNotFound(user_id))?;

        if !self
            .bookings
            .has_finished_booking(user_id, item.id, Utc::now())
            .await?
        {
            return Err(ItemError::Validation(format!(
                "User {} has no finished booking of item {}",
                user_id, item_id
            )));
        }

        let comment = Comment::new(item.id, author.id, author.name, input);
        let saved = self.repository.add_comment(comment).await?;
        Ok(saved.into())
    }

    async fn find_item(&self, item_id: Uuid) -> ItemResult<Item> {
        self.repository
            .get_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound(item_id))
    }

    async fn owner_view(&self, item: Item, comments: Vec<CommentView>) -> ItemResult<ItemView> {
        let now = Utc::now();
        let last = self.bookings.last_booking(item.id, now).await?;
        let next = self.bookings.next_booking(item.id, now).await?;
        Ok(item.into_view(comments, last, next))
    }
}
