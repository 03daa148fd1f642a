use async_trait::async_trait;
use database::BaseRepository;
use domain_users::{UserReferences, UserResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity, error::RequestResult, models::ItemRequest, repository::ItemRequestRepository,
};

#[derive(Clone)]
pub struct PgItemRequestRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgItemRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ItemRequestRepository for PgItemRequestRepository {
    async fn create(&self, request: ItemRequest) -> RequestResult<ItemRequest> {
        let model = self.base.insert(request.into()).await?;

        tracing::info!(request_id = %model.id, "Created item request");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> RequestResult<Option<ItemRequest>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn list_by_requester(&self, requester_id: Uuid) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequesterId.eq(requester_id))
            .order_by_desc(entity::Column::Created)
            .order_by_desc(entity::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_others(
        &self,
        user_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequesterId.ne(user_id))
            .order_by_desc(entity::Column::Created)
            .order_by_desc(entity::Column::Id)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserReferences for PgItemRequestRepository {
    async fn references_user(&self, user_id: Uuid) -> UserResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::RequesterId.eq(user_id))
            .count(self.base.db())
            .await?;
        Ok(count > 0)
    }
}
