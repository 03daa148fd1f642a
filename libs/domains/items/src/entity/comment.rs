use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub item_id: Uuid,
    pub author_id: Uuid,
    /// Copied from the author at posting time
    pub author_name: String,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            item_id: model.item_id,
            author_id: model.author_id,
            author_name: model.author_name,
            created: model.created.into(),
        }
    }
}

impl From<crate::models::Comment> for ActiveModel {
    fn from(comment: crate::models::Comment) -> Self {
        ActiveModel {
            id: Set(comment.id),
            text: Set(comment.text),
            item_id: Set(comment.item_id),
            author_id: Set(comment.author_id),
            author_name: Set(comment.author_name),
            created: Set(comment.created.into()),
        }
    }
}
