use axum_helpers::validation::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A user's request for an item nobody has listed yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub id: Uuid,
    pub description: String,
    pub requester_id: Uuid,
    pub created: DateTime<Utc>,
}

/// DTO for posting a request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(custom(function = "not_blank"))]
    pub description: String,
}

/// An item listed in answer to a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestedItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: Uuid,
    pub request_id: Uuid,
}

/// A request together with the items that answer it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestView {
    pub id: Uuid,
    pub description: String,
    pub requester_id: Uuid,
    pub created: DateTime<Utc>,
    pub items: Vec<RequestedItem>,
}

impl ItemRequest {
    pub fn new(requester_id: Uuid, input: CreateItemRequest) -> Self {
        Self {
            id: Uuid::now_v7(),
            description: input.description,
            requester_id,
            created: Utc::now(),
        }
    }

    pub fn with_items(self, items: Vec<RequestedItem>) -> ItemRequestView {
        ItemRequestView {
            id: self.id,
            description: self.description,
            requester_id: self.requester_id,
            created: self.created,
            items,
        }
    }
}
