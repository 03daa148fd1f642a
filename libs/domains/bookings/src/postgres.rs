use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::BaseRepository;
use domain_items::{BookingHistory, BookingSummary, ItemResult};
use domain_users::{UserReferences, UserResult};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, UpdateMany,
};
use uuid::Uuid;

use crate::{
    entity,
    error::BookingResult,
    models::{Booking, BookingState, BookingStatus},
    repository::{BookingRepository, Party},
};

#[derive(Clone)]
pub struct PgBookingRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn party_condition(party: Party) -> Condition {
    match party {
        Party::Booker(id) => Condition::all().add(entity::Column::BookerId.eq(id)),
        Party::Owner(id) => Condition::all().add(entity::Column::OwnerId.eq(id)),
    }
}

fn state_condition(state: BookingState, now: DateTime<Utc>) -> Condition {
    let condition = Condition::all();
    match state {
        BookingState::All => condition,
        BookingState::Current => condition
            .add(entity::Column::StartDate.lte(now))
            .add(entity::Column::EndDate.gte(now)),
        BookingState::Past => condition.add(entity::Column::EndDate.lt(now)),
        BookingState::Future => condition.add(entity::Column::StartDate.gt(now)),
        BookingState::Waiting => condition.add(entity::Column::Status.eq(BookingStatus::Waiting)),
        BookingState::Rejected => {
            condition.add(entity::Column::Status.eq(BookingStatus::Rejected))
        }
    }
}

/// `UPDATE bookings SET status = ? WHERE id = ? AND status = 'WAITING'`
fn decide_statement(id: Uuid, status: BookingStatus) -> UpdateMany<entity::Entity> {
    entity::Entity::update_many()
        .set(entity::ActiveModel {
            status: Set(status),
            ..Default::default()
        })
        .filter(entity::Column::Id.eq(id))
        .filter(entity::Column::Status.eq(BookingStatus::Waiting))
}

fn live_for_item(item_id: Uuid) -> Condition {
    Condition::all()
        .add(entity::Column::ItemId.eq(item_id))
        .add(entity::Column::Status.ne(BookingStatus::Rejected))
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booking: Booking) -> BookingResult<Booking> {
        let model = self.base.insert(booking.into()).await?;

        tracing::info!(booking_id = %model.id, item_id = %model.item_id, "Created booking");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn list(
        &self,
        party: Party,
        state: BookingState,
        now: DateTime<Utc>,
        offset: usize,
        limit: usize,
    ) -> BookingResult<Vec<Booking>> {
        let models = entity::Entity::find()
            .filter(party_condition(party))
            .filter(state_condition(state, now))
            .order_by_desc(entity::Column::StartDate)
            .order_by_desc(entity::Column::Id)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn decide(&self, id: Uuid, status: BookingStatus) -> BookingResult<Option<Booking>> {
        let result = decide_statement(id, status).exec(self.base.db()).await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        tracing::info!(booking_id = %id, status = %status, "Decided booking");
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn last_for_item(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<Option<Booking>> {
        let model = entity::Entity::find()
            .filter(live_for_item(item_id))
            .filter(entity::Column::StartDate.lt(now))
            .order_by_desc(entity::Column::StartDate)
            .one(self.base.db())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn next_for_item(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<Option<Booking>> {
        let model = entity::Entity::find()
            .filter(live_for_item(item_id))
            .filter(entity::Column::StartDate.gt(now))
            .order_by_asc(entity::Column::StartDate)
            .one(self.base.db())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn has_finished(
        &self,
        booker_id: Uuid,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<bool> {
        let count = entity::Entity::find()
            .filter(live_for_item(item_id))
            .filter(entity::Column::BookerId.eq(booker_id))
            .filter(entity::Column::EndDate.lt(now))
            .count(self.base.db())
            .await?;

        Ok(count > 0)
    }
}

#[async_trait]
impl BookingHistory for PgBookingRepository {
    async fn last_booking(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> ItemResult<Option<BookingSummary>> {
        Ok(self.last_for_item(item_id, now).await?.map(Into::into))
    }

    async fn next_booking(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> ItemResult<Option<BookingSummary>> {
        Ok(self.next_for_item(item_id, now).await?.map(Into::into))
    }

    async fn has_finished_booking(
        &self,
        booker_id: Uuid,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> ItemResult<bool> {
        Ok(self.has_finished(booker_id, item_id, now).await?)
    }
}


#[async_trait]
impl UserReferences for PgBookingRepository {
    async fn references_user(&self, user_id: Uuid) -> UserResult<bool> {
        let count = entity::Entity::find()
            .filter(
                Condition::any()
                    .add(entity::Column::BookerId.eq(user_id))
                    .add(entity::Column::OwnerId.eq(user_id)),
            )
            .count(self.base.db())
            .await?;
        Ok(count > 0)
    }
}
