use axum_helpers::validation::not_blank;
use chrono::{DateTime, Utc};
use domain_requests::RequestedItem;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Something a user offers for lending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Whether the owner currently accepts bookings
    pub available: bool,
    pub owner_id: Uuid,
    /// Request this item was listed in answer to
    pub request_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for listing an item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(required(message = "available must be provided"))]
    pub available: Option<bool>,
    pub request_id: Option<Uuid>,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// A borrower's comment on an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub item_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(custom(function = "not_blank"))]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: Uuid,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

/// Booking as shown on an item: who booked it and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub id: Uuid,
    pub booker_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Item with its comments and, for the owner, its surrounding bookings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<Uuid>,
    pub last_booking: Option<BookingSummary>,
    pub next_booking: Option<BookingSummary>,
    pub comments: Vec<CommentView>,
}

/// `GET /items/search` query
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Matched case-insensitively against name and description
    #[serde(default)]
    pub text: String,
}

impl Item {
    pub fn new(owner_id: Uuid, input: CreateItem) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            available: input.available.unwrap_or_default(),
            owner_id,
            request_id: input.request_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
        self.updated_at = Utc::now();
    }

    /// Case-insensitive containment in name or description
    pub fn matches(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    pub fn into_view(
        self,
        comments: Vec<CommentView>,
        last_booking: Option<BookingSummary>,
        next_booking: Option<BookingSummary>,
    ) -> ItemView {
        ItemView {
            id: self.id,
            name: self.name,
            description: self.description,
            available: self.available,
            request_id: self.request_id,
            last_booking,
            next_booking,
            comments,
        }
    }

    /// `None` for items not listed in answer to a request
    pub fn into_requested(self) -> Option<RequestedItem> {
        let request_id = self.request_id?;
        Some(RequestedItem {
            id: self.id,
            name: self.name,
            description: self.description,
            available: self.available,
            owner_id: self.owner_id,
            request_id,
        })
    }
}

impl Comment {
    pub fn new(item_id: Uuid, author_id: Uuid, author_name: String, input: CreateComment) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: input.text,
            item_id,
            author_id,
            author_name,
            created: Utc::now(),
        }
    }
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_name: comment.author_name,
            created: comment.created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drill() -> Item {
        Item::new(
            Uuid::now_v7(),
            CreateItem {
                name: "Cordless Drill".to_string(),
                description: "18V, two batteries".to_string(),
                available: Some(true),
                request_id: None,
            },
        )
    }

    #[test]
    fn test_create_item_requires_available() {
        let input = CreateItem {
            name: "Drill".to_string(),
            description: "Works".to_string(),
            available: None,
            request_id: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_item_rejects_blank_text() {
        let input = CreateItem {
            name: "Drill".to_string(),
            description: " ".to_string(),
            available: Some(true),
            request_id: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_matches_is_case_insensitive_on_both_fields() {
        let item = drill();
        assert!(item.matches("DRILL"));
        assert!(item.matches("batter"));
        assert!(!item.matches("hammer"));
    }

    #[test]
    fn test_apply_update_is_partial() {
        let mut item = drill();
        item.apply_update(UpdateItem {
            available: Some(false),
            ..Default::default()
        });

        assert!(!item.available);
        assert_eq!(item.name, "Cordless Drill");
    }

    #[test]
    fn test_into_requested_needs_request_id() {
        assert!(drill().into_requested().is_none());

        let request_id = Uuid::now_v7();
        let mut item = drill();
        item.request_id = Some(request_id);
        assert_eq!(item.into_requested().unwrap().request_id, request_id);
    }

    #[test]
    fn test_item_view_serializes_camel_case() {
        let json = serde_json::to_value(drill().into_view(vec![], None, None)).unwrap();
        assert!(json.get("lastBooking").is_some());
        assert!(json.get("nextBooking").is_some());
        assert!(json.get("requestId").is_some());
    }
}
