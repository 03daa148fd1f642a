use chrono::{DateTime, Utc};
use domain_items::BookingSummary;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Booking lifecycle: WAITING until the owner answers, then final
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Awaiting the owner's decision
    #[default]
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

impl BookingStatus {
    /// Lowercase word used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Filter for booking lists, relative to the current time
///
/// Parsed case-sensitively from the `state` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingState {
    #[default]
    All,
    /// start <= now <= end
    Current,
    /// end < now
    Past,
    /// start > now
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    /// Absent means ALL
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            None => Some(Self::All),
            Some(value) => value.parse().ok(),
        }
    }

    pub fn matches(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Current => booking.start <= now && now <= booking.end,
            Self::Past => booking.end < now,
            Self::Future => booking.start > now,
            Self::Waiting => booking.status == BookingStatus::Waiting,
            Self::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

/// A reservation of an item for a time window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub item_id: Uuid,
    pub booker_id: Uuid,
    /// Owner of the item when it was booked
    pub owner_id: Uuid,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for booking an item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_period"))]
pub struct CreateBooking {
    pub item_id: Uuid,
    /// RFC 3339 timestamp, not in the past
    pub start: DateTime<Utc>,
    /// RFC 3339 timestamp, after `start`
    pub end: DateTime<Utc>,
}

fn validate_period(input: &CreateBooking) -> Result<(), ValidationError> {
    if input.start < input.end {
        Ok(())
    } else {
        Err(ValidationError::new("period").with_message("start must be before end".into()))
    }
}

/// Item reference embedded in booking responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookedItem {
    pub id: Uuid,
    pub name: String,
}

/// Booker reference embedded in booking responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Booker {
    pub id: Uuid,
}

/// Booking as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: BookedItem,
    pub booker: Booker,
}

/// `state` filter for booking lists
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StateQuery {
    /// ALL, CURRENT, PAST, FUTURE, WAITING or REJECTED (default ALL)
    pub state: Option<String>,
}

/// Owner's answer to a booking
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Decision {
    /// true approves, false rejects
    pub approved: bool,
}

impl Booking {
    pub fn new(booker_id: Uuid, owner_id: Uuid, input: CreateBooking) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            start: input.start,
            end: input.end,
            item_id: input.item_id,
            booker_id,
            owner_id,
            status: BookingStatus::Waiting,
            created_at: now,
            updated_at: now,
        }
    }

    /// Booker or item owner
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.booker_id == user_id || self.owner_id == user_id
    }

    pub fn into_view(self, item_name: String) -> BookingView {
        BookingView {
            id: self.id,
            start: self.start,
            end: self.end,
            status: self.status,
            item: BookedItem {
                id: self.item_id,
                name: item_name,
            },
            booker: Booker { id: self.booker_id },
        }
    }
}

impl From<Booking> for BookingSummary {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker_id,
            start: booking.start,
            end: booking.end,
        }
    }
}
