//! Booking Service - Business logic layer

use chrono::Utc;
use domain_items::{Item, ItemRepository};
use domain_users::UserRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingState, BookingStatus, BookingView, CreateBooking};
use crate::repository::{BookingRepository, Party};

/// Booking service: creation, owner decisions and listings
pub struct BookingService<R: BookingRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserRepository>,
    items: Arc<dyn ItemRepository>,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(
        repository: R,
        users: Arc<dyn UserRepository>,
        items: Arc<dyn ItemRepository>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            items,
        }
    }

    /// Book someone else's available item; the booking starts out WAITING
    #[instrument(skip(self, input), fields(item_id = %input.item_id))]
    pub async fn create_booking(
        &self,
        booker_id: Uuid,
        input: CreateBooking,
    ) -> BookingResult<BookingView> {
        input
            .validate()
            .map_err(|e| BookingError::Validation(e.to_string()))?;
        if input.start < Utc::now() {
            return Err(BookingError::Validation(
                "start must not be in the past".to_string(),
            ));
        }

        self.ensure_user_exists(booker_id).await?;

        let item = self
            .items
            .get_by_id(input.item_id)
            .await?
            .ok_or(BookingError::ItemNotFound(input.item_id))?;
        if item.owner_id == booker_id {
            return Err(BookingError::OwnItem(item.id));
        }
        if !item.available {
            return Err(BookingError::Unavailable(item.id));
        }

        let booking = self
            .repository
            .create(Booking::new(booker_id, item.owner_id, input))
            .await?;

        tracing::info!(booking_id = %booking.id, booker_id = %booker_id, "Booking requested");
        Ok(booking.into_view(item.name))
    }

    /// Owner approves or rejects a WAITING booking
    #[instrument(skip(self))]
    pub async fn respond(
        &self,
        owner_id: Uuid,
        booking_id: Uuid,
        approved: bool,
    ) -> BookingResult<BookingView> {
        let booking = self.find_booking(booking_id).await?;
        if booking.owner_id != owner_id {
            return Err(BookingError::NotOwner {
                booking_id,
                user_id: owner_id,
            });
        }
        if booking.status != BookingStatus::Waiting {
            return Err(BookingError::AlreadyDecided(booking.status));
        }

        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        let decided = match self.repository.decide(booking_id, status).await? {
            Some(decided) => decided,
            // Someone else answered between the read and the update
            None => {
                let current = self.find_booking(booking_id).await?;
                return Err(BookingError::AlreadyDecided(current.status));
            }
        };

        tracing::info!(booking_id = %booking_id, status = %status, "Booking decided");
        self.view(decided).await
    }

    /// Visible to the booker and the item owner only
    #[instrument(skip(self))]
    pub async fn get_booking(&self, user_id: Uuid, booking_id: Uuid) -> BookingResult<BookingView> {
        let booking = self.find_booking(booking_id).await?;
        if !booking.involves(user_id) {
            return Err(BookingError::NotParty {
                booking_id,
                user_id,
            });
        }

        self.view(booking).await
    }

    /// Bookings made by `user_id`
    #[instrument(skip(self))]
    pub async fn booker_bookings(
        &self,
        user_id: Uuid,
        state: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> BookingResult<Vec<BookingView>> {
        self.list(Party::Booker(user_id), state, offset, limit)
            .await
    }

    /// Bookings of items owned by `user_id`
    #[instrument(skip(self))]
    pub async fn owner_bookings(
        &self,
        user_id: Uuid,
        state: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> BookingResult<Vec<BookingView>> {
        self.list(Party::Owner(user_id), state, offset, limit).await
    }

    async fn list(
        &self,
        party: Party,
        state: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> BookingResult<Vec<BookingView>> {
        let state = BookingState::parse(state)
            .ok_or_else(|| BookingError::UnknownState(state.unwrap_or_default().to_string()))?;

        let user_id = match party {
            Party::Booker(id) | Party::Owner(id) => id,
        };
        self.ensure_user_exists(user_id).await?;

        let bookings = self
            .repository
            .list(party, state, Utc::now(), offset, limit)
            .await?;
        self.views(bookings).await
    }

    async fn find_booking(&self, booking_id: Uuid) -> BookingResult<Booking> {
        self.repository
            .get_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound(booking_id))
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> BookingResult<()> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(BookingError::UserNotFound(user_id))?;
        Ok(())
    }

    async fn view(&self, booking: Booking) -> BookingResult<BookingView> {
        let item = self
            .items
            .get_by_id(booking.item_id)
            .await?
            .ok_or(BookingError::ItemNotFound(booking.item_id))?;
        Ok(booking.into_view(item.name))
    }

    /// Views for a page of bookings with one item lookup
    async fn views(&self, bookings: Vec<Booking>) -> BookingResult<Vec<BookingView>> {
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let mut item_ids: Vec<Uuid> = bookings.iter().map(|b| b.item_id).collect();
        item_ids.sort();
        item_ids.dedup();

        let names: HashMap<Uuid, String> = self
            .items
            .get_by_ids(item_ids)
            .await?
            .into_iter()
            .map(|item: Item| (item.id, item.name))
            .collect();

        bookings
            .into_iter()
            .map(|booking| {
                let name = names
                    .get(&booking.item_id)
                    .cloned()
                    .ok_or(BookingError::ItemNotFound(booking.item_id))?;
                Ok(booking.into_view(name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockBookingRepository;
    use chrono::Duration;
    use domain_items::{CreateItem, InMemoryItemRepository};
    use domain_users::{CreateUser, InMemoryUserRepository, User};
    use mockall::predicate::eq;

    struct World {
        users: Arc<InMemoryUserRepository>,
        items: Arc<InMemoryItemRepository>,
        owner: Uuid,
        booker: Uuid,
        item: Item,
    }

    async fn world(available: bool) -> World {
        let users = InMemoryUserRepository::new();
        let mut ids = Vec::new();
        for (name, email) in [("Owner", "owner@mail.com"), ("Booker", "booker@mail.com")] {
            let user = users
                .create(User::new(CreateUser {
                    name: name.to_string(),
                    email: email.to_string(),
                }))
                .await
                .unwrap();
            ids.push(user.id);
        }

        let items = InMemoryItemRepository::new();
        let item = items
            .create(Item::new(
                ids[0],
                CreateItem {
                    name: "Drill".to_string(),
                    description: "Cordless".to_string(),
                    available: Some(available),
                    request_id: None,
                },
            ))
            .await
            .unwrap();

        World {
            users: Arc::new(users),
            items: Arc::new(items),
            owner: ids[0],
            booker: ids[1],
            item,
        }
    }

    fn service(world: &World, repo: MockBookingRepository) -> BookingService<MockBookingRepository> {
        BookingService::new(repo, world.users.clone(), world.items.clone())
    }

    fn tomorrow(item_id: Uuid) -> CreateBooking {
        let start = Utc::now() + Duration::days(1);
        CreateBooking {
            item_id,
            start,
            end: start + Duration::hours(2),
        }
    }

    fn waiting(world: &World) -> Booking {
        Booking::new(world.booker, world.owner, tomorrow(world.item.id))
    }

    #[tokio::test]
    async fn test_create_booking_starts_waiting() {
        let world = world(true).await;
        let mut repo = MockBookingRepository::new();
        repo.expect_create().times(1).returning(Ok);

        let view = service(&world, repo)
            .create_booking(world.booker, tomorrow(world.item.id))
            .await
            .unwrap();

        assert_eq!(view.status, BookingStatus::Waiting);
        assert_eq!(view.item.name, "Drill");
        assert_eq!(view.booker.id, world.booker);
    }

    #[tokio::test]
    async fn test_create_booking_rejects_inverted_period() {
        let world = world(true).await;
        let mut repo = MockBookingRepository::new();
        repo.expect_create().never();

        let mut input = tomorrow(world.item.id);
        input.end = input.start - Duration::hours(1);

        let result = service(&world, repo)
            .create_booking(world.booker, input)
            .await;
        assert!(matches!(result, Err(BookingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_booking_rejects_past_start() {
        let world = world(true).await;
        let mut repo = MockBookingRepository::new();
        repo.expect_create().never();

        let start = Utc::now() - Duration::hours(1);
        let input = CreateBooking {
            item_id: world.item.id,
            start,
            end: start + Duration::hours(3),
        };

        let result = service(&world, repo)
            .create_booking(world.booker, input)
            .await;
        assert!(matches!(result, Err(BookingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_dates_are_checked_before_the_booker() {
        let world = world(true).await;
        let mut input = tomorrow(world.item.id);
        input.end = input.start;

        let result = service(&world, MockBookingRepository::new())
            .create_booking(Uuid::now_v7(), input)
            .await;
        assert!(matches!(result, Err(BookingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_owner_cannot_book_own_item() {
        let world = world(true).await;
        let mut repo = MockBookingRepository::new();
        repo.expect_create().never();

        let result = service(&world, repo)
            .create_booking(world.owner, tomorrow(world.item.id))
            .await;
        assert!(matches!(result, Err(BookingError::OwnItem(_))));
    }

    #[tokio::test]
    async fn test_unavailable_item_cannot_be_booked() {
        let world = world(false).await;
        let mut repo = MockBookingRepository::new();
        repo.expect_create().never();

        let result = service(&world, repo)
            .create_booking(world.booker, tomorrow(world.item.id))
            .await;
        assert!(matches!(result, Err(BookingError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_unknown_booker_and_item_are_not_found() {
        let world = world(true).await;

        let result = service(&world, MockBookingRepository::new())
            .create_booking(Uuid::now_v7(), tomorrow(world.item.id))
            .await;
        assert!(matches!(result, Err(BookingError::UserNotFound(_))));

        let result = service(&world, MockBookingRepository::new())
            .create_booking(world.booker, tomorrow(Uuid::now_v7()))
            .await;
        assert!(matches!(result, Err(BookingError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn test_owner_approves_waiting_booking() {
        let world = world(true).await;
        let booking = waiting(&world);
        let id = booking.id;
        let mut approved = booking.clone();
        approved.status = BookingStatus::Approved;

        let mut repo = MockBookingRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(booking.clone())));
        repo.expect_decide()
            .with(eq(id), eq(BookingStatus::Approved))
            .times(1)
            .returning(move |_, _| Ok(Some(approved.clone())));

        let view = service(&world, repo)
            .respond(world.owner, id, true)
            .await
            .unwrap();
        assert_eq!(view.status, BookingStatus::Approved);
    }

    #[tokio::test]
    async fn test_booker_cannot_respond() {
        let world = world(true).await;
        let booking = waiting(&world);
        let id = booking.id;

        let mut repo = MockBookingRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(booking.clone())));
        repo.expect_decide().never();

        let result = service(&world, repo).respond(world.booker, id, true).await;
        assert!(matches!(result, Err(BookingError::NotOwner { .. })));
    }

    #[tokio::test]
    async fn test_decided_booking_cannot_be_answered_again() {
        let world = world(true).await;
        let mut booking = waiting(&world);
        booking.status = BookingStatus::Rejected;
        let id = booking.id;

        let mut repo = MockBookingRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(booking.clone())));
        repo.expect_decide().never();

        let result = service(&world, repo).respond(world.owner, id, false).await;
        assert!(matches!(
            result,
            Err(BookingError::AlreadyDecided(BookingStatus::Rejected))
        ));
    }

    #[tokio::test]
    async fn test_losing_a_concurrent_decision() {
        let world = world(true).await;
        let booking = waiting(&world);
        let id = booking.id;
        let mut winner = booking.clone();
        winner.status = BookingStatus::Approved;

        let mut repo = MockBookingRepository::new();
        let mut reads = 0;
        repo.expect_get_by_id().returning(move |_| {
            reads += 1;
            if reads == 1 {
                Ok(Some(booking.clone()))
            } else {
                Ok(Some(winner.clone()))
            }
        });
        repo.expect_decide().returning(|_, _| Ok(None));

        let result = service(&world, repo).respond(world.owner, id, false).await;
        assert!(matches!(
            result,
            Err(BookingError::AlreadyDecided(BookingStatus::Approved))
        ));
    }

    #[tokio::test]
    async fn test_get_booking_hidden_from_strangers() {
        let world = world(true).await;
        let booking = waiting(&world);
        let id = booking.id;

        let mut repo = MockBookingRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(booking.clone())));

        let service = service(&world, repo);
        assert!(service.get_booking(world.booker, id).await.is_ok());
        assert!(service.get_booking(world.owner, id).await.is_ok());

        let result = service.get_booking(Uuid::now_v7(), id).await;
        assert!(matches!(result, Err(BookingError::NotParty { .. })));
    }

    #[tokio::test]
    async fn test_unknown_state_wins_over_unknown_user() {
        let world = world(true).await;
        let mut repo = MockBookingRepository::new();
        repo.expect_list().never();

        let result = service(&world, repo)
            .booker_bookings(Uuid::now_v7(), Some("UNSUPPORTED_STATUS"), 0, 10)
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Unknown state: UNSUPPORTED_STATUS");
    }

    #[tokio::test]
    async fn test_owner_listing_passes_party_and_state() {
        let world = world(true).await;
        let booking = waiting(&world);
        let owner = world.owner;

        let mut repo = MockBookingRepository::new();
        repo.expect_list()
            .withf(move |party, state, _, offset, limit| {
                *party == Party::Owner(owner)
                    && *state == BookingState::Future
                    && *offset == 10
                    && *limit == 5
            })
            .returning(move |_, _, _, _, _| Ok(vec![booking.clone()]));

        let views = service(&world, repo)
            .owner_bookings(owner, Some("FUTURE"), 10, 5)
            .await
            .unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].item.name, "Drill");
    }

    #[tokio::test]
    async fn test_listing_for_unknown_user_is_not_found() {
        let world = world(true).await;
        let mut repo = MockBookingRepository::new();
        repo.expect_list().never();

        let result = service(&world, repo)
            .owner_bookings(Uuid::now_v7(), None, 0, 10)
            .await;
        assert!(matches!(result, Err(BookingError::UserNotFound(_))));
    }
}
