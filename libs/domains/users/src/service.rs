use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::{UserReferences, UserRepository};

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    references: Vec<Arc<dyn UserReferences>>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            references: Vec::new(),
        }
    }

    /// Domains consulted before a user is deleted
    pub fn with_references(mut self, references: Vec<Arc<dyn UserReferences>>) -> Self {
        self.references = references;
        self
    }

    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        self.repository.create(User::new(input)).await
    }

    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Apply a partial update; only provided fields are validated
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let mut user = self.get_user(id).await?;
        user.apply_update(input);

        self.repository.update(user).await
    }

    /// Refused with `InUse` while any item, request, booking or comment
    /// still points at the user
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        self.get_user(id).await?;

        for references in &self.references {
            if references.references_user(id).await? {
                return Err(UserError::InUse(id));
            }
        }

        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }
}
