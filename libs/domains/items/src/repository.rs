use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_requests::{RequestResult, RequestedItem, RequestedItems};
use domain_users::{UserReferences, UserResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::{BookingSummary, Comment, Item};

/// Repository trait for items and their comments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, item: Item) -> ItemResult<Item>;

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// Items among `ids`; unknown ids are skipped
    async fn get_by_ids(&self, ids: Vec<Uuid>) -> ItemResult<Vec<Item>>;

    /// Persist a modified item
    async fn update(&self, item: Item) -> ItemResult<Item>;

    /// Items of `owner_id` in the order they were listed
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> ItemResult<Vec<Item>>;

    /// Available items whose name or description contains `text`, ignoring case
    async fn search(&self, text: String, offset: usize, limit: usize) -> ItemResult<Vec<Item>>;

    /// Items listed in answer to any of `request_ids`
    async fn list_by_requests(&self, request_ids: Vec<Uuid>) -> ItemResult<Vec<Item>>;

    async fn add_comment(&self, comment: Comment) -> ItemResult<Comment>;

    /// Comments on any of `item_ids`, oldest first
    async fn comments_for_items(&self, item_ids: Vec<Uuid>) -> ItemResult<Vec<Comment>>;
}

/// Booking facts the items domain needs, supplied by the bookings domain
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingHistory: Send + Sync {
    /// Latest non-rejected booking of the item that started before `now`
    async fn last_booking(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> ItemResult<Option<BookingSummary>>;

    /// Earliest non-rejected booking of the item that starts after `now`
    async fn next_booking(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> ItemResult<Option<BookingSummary>>;

    /// Whether `booker_id` has a non-rejected booking of the item that
    /// ended before `now`
    async fn has_finished_booking(
        &self,
        booker_id: Uuid,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> ItemResult<bool>;
}

/// In-memory implementation of ItemRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<Uuid, Item>>>,
    comments: Arc<RwLock<HashMap<Uuid, Comment>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Creation order; v7 ids break ties between items created in the same instant
fn in_listing_order(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    items
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        items.insert(item.id, item.clone());

        tracing::info!(item_id = %item.id, owner_id = %item.owner_id, "Created item");
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn get_by_ids(&self, ids: Vec<Uuid>) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        Ok(ids.iter().filter_map(|id| items.get(id).cloned()).collect())
    }

    async fn update(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.items.write().await;

        let slot = items.get_mut(&item.id).ok_or(ItemError::NotFound(item.id))?;
        *slot = item.clone();

        tracing::info!(item_id = %item.id, "Updated item");
        Ok(item)
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        let owned = items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();

        Ok(in_listing_order(owned)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn search(&self, text: String, offset: usize, limit: usize) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        let found = items
            .values()
            .filter(|i| i.available && i.matches(&text))
            .cloned()
            .collect();

        Ok(in_listing_order(found)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn list_by_requests(&self, request_ids: Vec<Uuid>) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;
        let answering = items
            .values()
            .filter(|i| i.request_id.is_some_and(|r| request_ids.contains(&r)))
            .cloned()
            .collect();
        Ok(in_listing_order(answering))
    }

    async fn add_comment(&self, comment: Comment) -> ItemResult<Comment> {
        let mut comments = self.comments.write().await;
        comments.insert(comment.id, comment.clone());

        tracing::info!(comment_id = %comment.id, item_id = %comment.item_id, "Added comment");
        Ok(comment)
    }

    async fn comments_for_items(&self, item_ids: Vec<Uuid>) -> ItemResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        let mut result: Vec<Comment> = comments
            .values()
            .filter(|c| item_ids.contains(&c.item_id))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        Ok(result)
    }
}

#[async_trait]
impl RequestedItems for InMemoryItemRepository {
    async fn items_for_requests(&self, request_ids: Vec<Uuid>) -> RequestResult<Vec<RequestedItem>> {
        let items = self.list_by_requests(request_ids).await?;
        Ok(items.into_iter().filter_map(Item::into_requested).collect())
    }
}


#[async_trait]
impl UserReferences for InMemoryItemRepository {
    async fn references_user(&self, user_id: Uuid) -> UserResult<bool> {
        if self.items.read().await.values().any(|i| i.owner_id == user_id) {
            return Ok(true);
        }
        let comments = self.comments.read().await;
        Ok(comments.values().any(|c| c.author_id == user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateComment, CreateItem};

    fn item(owner_id: Uuid, name: &str, description: &str, available: bool) -> Item {
        Item::new(
            owner_id,
            CreateItem {
                name: name.to_string(),
                description: description.to_string(),
                available: Some(available),
                request_id: None,
            },
        )
    }

    #[tokio::test]
    async fn test_create_and_get_item() {
        let repo = InMemoryItemRepository::new();
        let created = repo
            .create(item(Uuid::now_v7(), "Drill", "Cordless", true))
            .await
            .unwrap();

        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_owners_and_comment_authors_are_referenced() {
        let repo = InMemoryItemRepository::new();
        let owner = Uuid::now_v7();
        let author = Uuid::now_v7();
        let drill = repo
            .create(item(owner, "Drill", "Cordless", true))
            .await
            .unwrap();

        assert!(repo.references_user(owner).await.unwrap());
        assert!(!repo.references_user(author).await.unwrap());

        repo.add_comment(Comment::new(
            drill.id,
            author,
            "Bob".to_string(),
            CreateComment {
                text: "Works well".to_string(),
            },
        ))
        .await
        .unwrap();
        assert!(repo.references_user(author).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let repo = InMemoryItemRepository::new();
        let ghost = item(Uuid::now_v7(), "Ghost", "Never stored", true);

        assert!(matches!(
            repo.update(ghost).await,
            Err(ItemError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_by_owner_keeps_listing_order() {
        let repo = InMemoryItemRepository::new();
        let owner = Uuid::now_v7();

        for name in ["first", "second", "third"] {
            repo.create(item(owner, name, "x", true)).await.unwrap();
        }
        repo.create(item(Uuid::now_v7(), "foreign", "x", true))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .list_by_owner(owner, 1, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["second", "third"]);
    }

    #[tokio::test]
    async fn test_search_skips_unavailable_items() {
        let repo = InMemoryItemRepository::new();
        let owner = Uuid::now_v7();

        repo.create(item(owner, "Drill", "cordless", true))
            .await
            .unwrap();
        repo.create(item(owner, "Old drill", "broken", false))
            .await
            .unwrap();
        repo.create(item(owner, "Saw", "for a DRILL-free day", true))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .search("dRiLl".to_string(), 0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Drill", "Saw"]);
    }

    #[tokio::test]
    async fn test_items_for_requests() {
        let repo = InMemoryItemRepository::new();
        let request_id = Uuid::now_v7();

        let mut answer = item(Uuid::now_v7(), "Tent", "Two person", true);
        answer.request_id = Some(request_id);
        repo.create(answer.clone()).await.unwrap();
        repo.create(item(Uuid::now_v7(), "Stove", "Gas", true))
            .await
            .unwrap();

        let found = repo.items_for_requests(vec![request_id]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, answer.id);
    }

    #[tokio::test]
    async fn test_comments_for_items_oldest_first() {
        let repo = InMemoryItemRepository::new();
        let item_id = Uuid::now_v7();
        let author = Uuid::now_v7();

        for text in ["first", "second"] {
            repo.add_comment(Comment::new(
                item_id,
                author,
                "Bob".to_string(),
                CreateComment {
                    text: text.to_string(),
                },
            ))
            .await
            .unwrap();
        }

        let texts: Vec<String> = repo
            .comments_for_items(vec![item_id])
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }
}
