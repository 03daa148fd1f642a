use async_trait::async_trait;
use domain_users::{UserReferences, UserResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::RequestResult;
use crate::models::{ItemRequest, RequestedItem};

/// Repository trait for ItemRequest persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRequestRepository: Send + Sync {
    async fn create(&self, request: ItemRequest) -> RequestResult<ItemRequest>;

    async fn get_by_id(&self, id: Uuid) -> RequestResult<Option<ItemRequest>>;

    /// Requests posted by `requester_id`, newest first
    async fn list_by_requester(&self, requester_id: Uuid) -> RequestResult<Vec<ItemRequest>>;

    /// Requests posted by anyone except `user_id`, newest first
    async fn list_by_others(
        &self,
        user_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> RequestResult<Vec<ItemRequest>>;
}

/// Lookup of the items listed in answer to requests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestedItems: Send + Sync {
    /// Every item whose request id is in `request_ids`
    async fn items_for_requests(&self, request_ids: Vec<Uuid>)
    -> RequestResult<Vec<RequestedItem>>;
}

/// In-memory implementation of ItemRequestRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRequestRepository {
    requests: Arc<RwLock<HashMap<Uuid, ItemRequest>>>,
}

impl InMemoryItemRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut requests: Vec<ItemRequest>) -> Vec<ItemRequest> {
    requests.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
    requests
}

#[async_trait]
impl ItemRequestRepository for InMemoryItemRequestRepository {
    async fn create(&self, request: ItemRequest) -> RequestResult<ItemRequest> {
        let mut requests = self.requests.write().await;
        requests.insert(request.id, request.clone());

        tracing::info!(request_id = %request.id, "Created item request");
        Ok(request)
    }

    async fn get_by_id(&self, id: Uuid) -> RequestResult<Option<ItemRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.get(&id).cloned())
    }

    async fn list_by_requester(&self, requester_id: Uuid) -> RequestResult<Vec<ItemRequest>> {
        let requests = self.requests.read().await;
        let own = requests
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect();
        Ok(newest_first(own))
    }

    async fn list_by_others(
        &self,
        user_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> RequestResult<Vec<ItemRequest>> {
        let requests = self.requests.read().await;
        let others = requests
            .values()
            .filter(|r| r.requester_id != user_id)
            .cloned()
            .collect();

        Ok(newest_first(others)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }
}


#[async_trait]
impl UserReferences for InMemoryItemRequestRepository {
    async fn references_user(&self, user_id: Uuid) -> UserResult<bool> {
        let requests = self.requests.read().await;
        Ok(requests.values().any(|r| r.requester_id == user_id))
    }
}
