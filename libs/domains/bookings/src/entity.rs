use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::BookingStatus;

/// `start`/`end` are stored as `start_date`/`end_date`; `end` is reserved in SQL
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub item_id: Uuid,
    pub booker_id: Uuid,
    pub owner_id: Uuid,
    pub status: BookingStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Booking {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            start: model.start_date.into(),
            end: model.end_date.into(),
            item_id: model.item_id,
            booker_id: model.booker_id,
            owner_id: model.owner_id,
            status: model.status,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::Booking> for ActiveModel {
    fn from(booking: crate::models::Booking) -> Self {
        ActiveModel {
            id: Set(booking.id),
            start_date: Set(booking.start.into()),
            end_date: Set(booking.end.into()),
            item_id: Set(booking.item_id),
            booker_id: Set(booking.booker_id),
            owner_id: Set(booking.owner_id),
            status: Set(booking.status),
            created_at: Set(booking.created_at.into()),
            updated_at: Set(booking.updated_at.into()),
        }
    }
}
