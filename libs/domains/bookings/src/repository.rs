use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_items::{BookingHistory, BookingSummary, ItemResult};
use domain_users::{UserReferences, UserResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::BookingResult;
use crate::models::{Booking, BookingState, BookingStatus};

/// Which side of the booking a list is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Booker(Uuid),
    Owner(Uuid),
}

impl Party {
    pub fn includes(&self, booking: &Booking) -> bool {
        match *self {
            Party::Booker(id) => booking.booker_id == id,
            Party::Owner(id) => booking.owner_id == id,
        }
    }
}

/// Repository trait for bookings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: Booking) -> BookingResult<Booking>;

    async fn get_by_id(&self, id: Uuid) -> BookingResult<Option<Booking>>;

    /// Bookings of `party` matching `state`, latest start first
    async fn list(
        &self,
        party: Party,
        state: BookingState,
        now: DateTime<Utc>,
        offset: usize,
        limit: usize,
    ) -> BookingResult<Vec<Booking>>;

    /// Move a WAITING booking to `status`.
    ///
    /// Returns `None` without touching anything when the booking is missing
    /// or already decided.
    async fn decide(&self, id: Uuid, status: BookingStatus) -> BookingResult<Option<Booking>>;

    /// Latest non-rejected booking of the item that started before `now`
    async fn last_for_item(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<Option<Booking>>;

    /// Earliest non-rejected booking of the item that starts after `now`
    async fn next_for_item(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<Option<Booking>>;

    /// Whether `booker_id` has a non-rejected booking of the item that ended before `now`
    async fn has_finished(
        &self,
        booker_id: Uuid,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<bool>;
}

/// In-memory implementation of BookingRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn live_for_item(&self, item_id: Uuid) -> Vec<Booking> {
        let bookings = self.bookings.read().await;
        bookings
            .values()
            .filter(|b| b.item_id == item_id && b.status != BookingStatus::Rejected)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booking: Booking) -> BookingResult<Booking> {
        let mut bookings = self.bookings.write().await;
        bookings.insert(booking.id, booking.clone());

        tracing::info!(booking_id = %booking.id, item_id = %booking.item_id, "Created booking");
        Ok(booking)
    }

    async fn get_by_id(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn list(
        &self,
        party: Party,
        state: BookingState,
        now: DateTime<Utc>,
        offset: usize,
        limit: usize,
    ) -> BookingResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let mut found: Vec<Booking> = bookings
            .values()
            .filter(|b| party.includes(b) && state.matches(b, now))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.start.cmp(&a.start).then(b.id.cmp(&a.id)));

        Ok(found.into_iter().skip(offset).take(limit).collect())
    }

    async fn decide(&self, id: Uuid, status: BookingStatus) -> BookingResult<Option<Booking>> {
        let mut bookings = self.bookings.write().await;

        match bookings.get_mut(&id) {
            Some(booking) if booking.status == BookingStatus::Waiting => {
                booking.status = status;
                booking.updated_at = Utc::now();

                tracing::info!(booking_id = %id, status = %status, "Decided booking");
                Ok(Some(booking.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn last_for_item(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<Option<Booking>> {
        Ok(self
            .live_for_item(item_id)
            .await
            .into_iter()
            .filter(|b| b.start < now)
            .max_by_key(|b| b.start))
    }

    async fn next_for_item(
        &self,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<Option<Booking>> {
        Ok(self
            .live_for_item(item_id)
            .await
            .into_iter()
            .filter(|b| b.start > now)
            .min_by_key(|b| b.start))
    }

    async fn has_finished(
        &self,
        booker_id: Uuid,
        item_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<bool> {
        Ok(self
            .live_for_item(item_id)
            .await
            .iter()
            .any(|b| b.booker_id == booker_id && b.end < now))
    }
}

#[async_trait]
impl BookingHistory for InMemoryBookingRepository {
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
impl UserReferences for InMemoryBookingRepository {
    async fn references_user(&self, user_id: Uuid) -> UserResult<bool> {
        let bookings = self.bookings.read().await;
        Ok(bookings.values().any(|b| b.involves(user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateBooking;
    use chrono::Duration;

    struct Ids {
        item: Uuid,
        booker: Uuid,
        owner: Uuid,
    }

    fn ids() -> Ids {
        Ids {
            item: Uuid::now_v7(),
            booker: Uuid::now_v7(),
            owner: Uuid::now_v7(),
        }
    }

    fn booking(ids: &Ids, start_in_hours: i64, length_hours: i64) -> Booking {
        let start = Utc::now() + Duration::hours(start_in_hours);
        Booking::new(
            ids.booker,
            ids.owner,
            CreateBooking {
                item_id: ids.item,
                start,
                end: start + Duration::hours(length_hours),
            },
        )
    }

    #[tokio::test]
    async fn test_both_parties_are_referenced() {
        let repo = InMemoryBookingRepository::new();
        let ids = ids();
        repo.create(booking(&ids, 1, 1)).await.unwrap();

        assert!(repo.references_user(ids.booker).await.unwrap());
        assert!(repo.references_user(ids.owner).await.unwrap());
        assert!(!repo.references_user(Uuid::now_v7()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_party_and_orders_by_start_desc() {
        let repo = InMemoryBookingRepository::new();
        let ids = ids();
        let early = repo.create(booking(&ids, 1, 1)).await.unwrap();
        let late = repo.create(booking(&ids, 5, 1)).await.unwrap();
        let now = Utc::now();

        let as_booker = repo
            .list(Party::Booker(ids.booker), BookingState::All, now, 0, 10)
            .await
            .unwrap();
        assert_eq!(as_booker, vec![late.clone(), early.clone()]);

        let as_owner = repo
            .list(Party::Owner(ids.owner), BookingState::Future, now, 1, 10)
            .await
            .unwrap();
        assert_eq!(as_owner, vec![early]);

        let stranger = repo
            .list(Party::Owner(ids.booker), BookingState::All, now, 0, 10)
            .await
            .unwrap();
        assert!(stranger.is_empty());
    }

    #[tokio::test]
    async fn test_decide_only_once() {
        let repo = InMemoryBookingRepository::new();
        let created = repo.create(booking(&ids(), 1, 1)).await.unwrap();

        let approved = repo
            .decide(created.id, BookingStatus::Approved)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, BookingStatus::Approved);

        let second = repo
            .decide(created.id, BookingStatus::Rejected)
            .await
            .unwrap();
        assert!(second.is_none());

        let stored = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Approved);
    }

    #[tokio::test]
    async fn test_decide_missing_booking() {
        let repo = InMemoryBookingRepository::new();
        let result = repo
            .decide(Uuid::now_v7(), BookingStatus::Approved)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_history_skips_rejected_bookings() {
        let repo = InMemoryBookingRepository::new();
        let ids = ids();
        let finished = repo.create(booking(&ids, -10, 2)).await.unwrap();
        let rejected_later = repo.create(booking(&ids, -4, 2)).await.unwrap();
        repo.decide(rejected_later.id, BookingStatus::Rejected)
            .await
            .unwrap();
        let upcoming = repo.create(booking(&ids, 3, 1)).await.unwrap();
        repo.create(booking(&ids, 8, 1)).await.unwrap();
        let now = Utc::now();

        let last = repo.last_booking(ids.item, now).await.unwrap().unwrap();
        assert_eq!(last.id, finished.id);

        let next = repo.next_booking(ids.item, now).await.unwrap().unwrap();
        assert_eq!(next.id, upcoming.id);
    }

    #[tokio::test]
    async fn test_has_finished_booking() {
        let repo = InMemoryBookingRepository::new();
        let ids = ids();
        let now = Utc::now();

        repo.create(booking(&ids, 1, 1)).await.unwrap();
        assert!(!repo.has_finished_booking(ids.booker, ids.item, now).await.unwrap());

        let past = repo.create(booking(&ids, -3, 1)).await.unwrap();
        assert!(repo.has_finished_booking(ids.booker, ids.item, now).await.unwrap());
        assert!(!repo.has_finished_booking(ids.owner, ids.item, now).await.unwrap());

        repo.decide(past.id, BookingStatus::Rejected).await.unwrap();
        assert!(!repo.has_finished_booking(ids.booker, ids.item, now).await.unwrap());
    }
}
