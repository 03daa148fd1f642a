use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the item_requests table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "item_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub requester_id: Uuid,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::ItemRequest {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            requester_id: model.requester_id,
            created: model.created.into(),
        }
    }
}

impl From<crate::models::ItemRequest> for ActiveModel {
    fn from(request: crate::models::ItemRequest) -> Self {
        ActiveModel {
            id: Set(request.id),
            description: Set(request.description),
            requester_id: Set(request.requester_id),
            created: Set(request.created.into()),
        }
    }
}
