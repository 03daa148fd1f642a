use async_trait::async_trait;
use database::BaseRepository;
use domain_requests::{RequestResult, RequestedItem, RequestedItems};
use domain_users::{UserReferences, UserResult};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity::{comment, item},
    error::{ItemError, ItemResult},
    models::{Comment, Item},
    repository::ItemRepository,
};

#[derive(Clone)]
pub struct PgItemRepository {
    base: BaseRepository<item::Entity>,
    comments: BaseRepository<comment::Entity>,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db.clone()),
            comments: BaseRepository::new(db),
        }
    }
}

/// `%text%` with LIKE wildcards in `text` taken literally
fn contains_pattern(text: &str) -> LikeExpr {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{}%", escaped)).escape('\\')
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, item: Item) -> ItemResult<Item> {
        let model = self.base.insert(item.into()).await?;

        tracing::info!(item_id = %model.id, owner_id = %model.owner_id, "Created item");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_ids(&self, ids: Vec<Uuid>) -> ItemResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = item::Entity::find()
            .filter(item::Column::Id.is_in(ids))
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, item: Item) -> ItemResult<Item> {
        let id = item.id;
        let model = self.base.update(item.into()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ItemError::NotFound(id),
            other => ItemError::Database(other),
        })?;

        tracing::info!(item_id = %id, "Updated item");
        Ok(model.into())
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> ItemResult<Vec<Item>> {
        let models = item::Entity::find()
            .filter(item::Column::OwnerId.eq(owner_id))
            .order_by_asc(item::Column::CreatedAt)
            .order_by_asc(item::Column::Id)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn search(&self, text: String, offset: usize, limit: usize) -> ItemResult<Vec<Item>> {
        let matches_text = Condition::any()
            .add(Expr::col(item::Column::Name).ilike(contains_pattern(&text)))
            .add(Expr::col(item::Column::Description).ilike(contains_pattern(&text)));

        let models = item::Entity::find()
            .filter(item::Column::Available.eq(true))
            .filter(matches_text)
            .order_by_asc(item::Column::CreatedAt)
            .order_by_asc(item::Column::Id)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_requests(&self, request_ids: Vec<Uuid>) -> ItemResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = item::Entity::find()
            .filter(item::Column::RequestId.is_in(request_ids))
            .order_by_asc(item::Column::CreatedAt)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn add_comment(&self, comment: Comment) -> ItemResult<Comment> {
        let model = self.comments.insert(comment.into()).await?;

        tracing::info!(comment_id = %model.id, item_id = %model.item_id, "Added comment");
        Ok(model.into())
    }

    async fn comments_for_items(&self, item_ids: Vec<Uuid>) -> ItemResult<Vec<Comment>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = comment::Entity::find()
            .filter(comment::Column::ItemId.is_in(item_ids))
            .order_by_asc(comment::Column::Created)
            .order_by_asc(comment::Column::Id)
            .all(self.comments.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl RequestedItems for PgItemRepository {
    async fn items_for_requests(&self, request_ids: Vec<Uuid>) -> RequestResult<Vec<RequestedItem>> {
        let items = self.list_by_requests(request_ids).await?;
        Ok(items.into_iter().filter_map(Item::into_requested).collect())
    }
}


#[async_trait]
impl UserReferences for PgItemRepository {
    async fn references_user(&self, user_id: Uuid) -> UserResult<bool> {
        let owned = item::Entity::find()
            .filter(item::Column::OwnerId.eq(user_id))
            .count(self.base.db())
            .await?;
        if owned > 0 {
            return Ok(true);
        }

        let authored = comment::Entity::find()
            .filter(comment::Column::AuthorId.eq(user_id))
            .count(self.comments.db())
            .await?;
        Ok(authored > 0)
    }
}
