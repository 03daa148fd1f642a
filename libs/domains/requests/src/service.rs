use domain_users::UserRepository;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{RequestError, RequestResult};
use crate::models::{CreateItemRequest, ItemRequest, ItemRequestView, RequestedItem};
use crate::repository::{ItemRequestRepository, RequestedItems};

/// Service layer for item requests
#[derive(Clone)]
pub struct RequestService<R: ItemRequestRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserRepository>,
    items: Arc<dyn RequestedItems>,
}

impl<R: ItemRequestRepository> RequestService<R> {
    pub fn new(
        repository: R,
        users: Arc<dyn UserRepository>,
        items: Arc<dyn RequestedItems>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            items,
        }
    }

    pub async fn create_request(
        &self,
        user_id: Uuid,
        input: CreateItemRequest,
    ) -> RequestResult<ItemRequestView> {
        input
            .validate()
            .map_err(|e| RequestError::Validation(e.to_string()))?;
        self.ensure_user_exists(user_id).await?;

        let request = self
            .repository
            .create(ItemRequest::new(user_id, input))
            .await?;

        Ok(request.with_items(Vec::new()))
    }

    /// The caller's own requests, newest first, each with its answers
    pub async fn own_requests(&self, user_id: Uuid) -> RequestResult<Vec<ItemRequestView>> {
        self.ensure_user_exists(user_id).await?;

        let requests = self.repository.list_by_requester(user_id).await?;
        self.attach_items(requests).await
    }

    /// Everybody else's requests, newest first
    pub async fn other_requests(
        &self,
        user_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> RequestResult<Vec<ItemRequestView>> {
        self.ensure_user_exists(user_id).await?;

        let requests = self
            .repository
            .list_by_others(user_id, offset, limit)
            .await?;
        self.attach_items(requests).await
    }

    pub async fn get_request(&self, user_id: Uuid, id: Uuid) -> RequestResult<ItemRequestView> {
        self.ensure_user_exists(user_id).await?;

        let request = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(RequestError::NotFound(id))?;

        let mut views = self.attach_items(vec![request]).await?;
        views.pop().ok_or(RequestError::NotFound(id))
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> RequestResult<()> {
        self.users
            .get_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or(RequestError::UserNotFound(user_id))
    }

    /// One lookup for the whole batch, then grouped by request id
    async fn attach_items(
        &self,
        requests: Vec<ItemRequest>,
    ) -> RequestResult<Vec<ItemRequestView>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let ids = requests.iter().map(|r| r.id).collect();
        let mut by_request: HashMap<Uuid, Vec<RequestedItem>> = HashMap::new();
        for item in self.items.items_for_requests(ids).await? {
            by_request.entry(item.request_id).or_default().push(item);
        }

        Ok(requests
            .into_iter()
            .map(|r| {
                let items = by_request.remove(&r.id).unwrap_or_default();
                r.with_items(items)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockItemRequestRepository, MockRequestedItems};
    use domain_users::{CreateUser, InMemoryUserRepository, User};

    async fn users_with(name: &str) -> (Arc<InMemoryUserRepository>, Uuid) {
        let users = InMemoryUserRepository::new();
        let user = users
            .create(User::new(CreateUser {
                name: name.to_string(),
                email: format!("{}@mail.com", name.to_lowercase()),
            }))
            .await
            .unwrap();
        (Arc::new(users), user.id)
    }

    #[tokio::test]
    async fn test_create_request_rejects_blank_description() {
        let (users, alice) = users_with("Alice").await;
        let mut repo = MockItemRequestRepository::new();
        repo.expect_create().never();

        let service = RequestService::new(repo, users, Arc::new(MockRequestedItems::new()));
        let result = service
            .create_request(
                alice,
                CreateItemRequest {
                    description: "   ".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(RequestError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_request_for_unknown_user_is_not_found() {
        let mut repo = MockItemRequestRepository::new();
        repo.expect_create().never();

        let service = RequestService::new(
            repo,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(MockRequestedItems::new()),
        );
        let result = service
            .create_request(
                Uuid::now_v7(),
                CreateItemRequest {
                    description: "A ladder".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(RequestError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_own_requests_carry_their_items() {
        let (users, alice) = users_with("Alice").await;
        let ladder = ItemRequest::new(
            alice,
            CreateItemRequest {
                description: "A ladder".to_string(),
            },
        );
        let drill = ItemRequest::new(
            alice,
            CreateItemRequest {
                description: "A drill".to_string(),
            },
        );
        let (ladder_id, drill_id) = (ladder.id, drill.id);

        let mut repo = MockItemRequestRepository::new();
        repo.expect_list_by_requester()
            .returning(move |_| Ok(vec![drill.clone(), ladder.clone()]));

        let mut items = MockRequestedItems::new();
        items.expect_items_for_requests().times(1).returning(move |_| {
            Ok(vec![RequestedItem {
                id: Uuid::now_v7(),
                name: "Step ladder".to_string(),
                description: "Three steps".to_string(),
                available: true,
                owner_id: Uuid::now_v7(),
                request_id: ladder_id,
            }])
        });

        let service = RequestService::new(repo, users, Arc::new(items));
        let views = service.own_requests(alice).await.unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, drill_id);
        assert!(views[0].items.is_empty());
        assert_eq!(views[1].id, ladder_id);
        assert_eq!(views[1].items[0].name, "Step ladder");
    }

    #[tokio::test]
    async fn test_get_missing_request_is_not_found() {
        let (users, alice) = users_with("Alice").await;
        let mut repo = MockItemRequestRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = RequestService::new(repo, users, Arc::new(MockRequestedItems::new()));
        assert!(matches!(
            service.get_request(alice, Uuid::now_v7()).await,
            Err(RequestError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_other_requests_skip_item_lookup_when_empty() {
        let (users, alice) = users_with("Alice").await;
        let mut repo = MockItemRequestRepository::new();
        repo.expect_list_by_others()
            .withf(move |user, offset, limit| *user == alice && *offset == 10 && *limit == 10)
            .returning(|_, _, _| Ok(Vec::new()));

        let mut items = MockRequestedItems::new();
        items.expect_items_for_requests().never();

        let service = RequestService::new(repo, users, Arc::new(items));
        assert!(service.other_requests(alice, 10, 10).await.unwrap().is_empty());
    }
}
