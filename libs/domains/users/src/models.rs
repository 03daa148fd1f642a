use axum_helpers::validation::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A registered ShareIt user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Unique, compared case-insensitively
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for registering a user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "Email must be valid"), length(max = 512))]
    pub email: String,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(email(message = "Email must be valid"), length(max = 512))]
    pub email: Option<String>,
}

impl User {
    pub fn new(input: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_create_user_validation() {
        assert!(create("Alice", "a@mail.com").validate().is_ok());
        assert!(create("  ", "a@mail.com").validate().is_err());
        assert!(create("Alice", "not-an-email").validate().is_err());
        assert!(create("Alice", "").validate().is_err());
    }

    #[test]
    fn test_update_user_validates_present_fields_only() {
        assert!(UpdateUser::default().validate().is_ok());

        let update = UpdateUser {
            email: Some("broken".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_apply_update_is_partial() {
        let mut user = User::new(create("Alice", "a@mail.com"));
        user.apply_update(UpdateUser {
            name: Some("Alicia".to_string()),
            email: None,
        });

        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, "a@mail.com");
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User::new(create("Alice", "a@mail.com"));
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["email"], "a@mail.com");
    }
}
