//! Sign-up, profile edits and the admin export.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{User, validate_email, validate_username};
use crate::error::DomainError;
use crate::ports::{Clock, Repositories};

/// One line of the user export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserExportRow {
    pub username: String,
    pub id: Uuid,
    pub email: String,
}

impl From<User> for UserExportRow {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id,
            email: user.email,
        }
    }
}

pub struct AccountService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// Create a user and its profile.
    pub async fn sign_up(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> Result<User, DomainError> {
        validate_username(&username)?;
        validate_email(&email)?;

        if self.repos.users.find_by_username(&username).await?.is_some() {
            return Err(DomainError::Duplicate(
                "Username is already in use.".to_string(),
            ));
        }

        let (user, _profile) = self
            .repos
            .users
            .create(User::new(username, email, password_hash))
            .await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User signed up");

        Ok(user)
    }

    pub async fn find(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.repos.users.find_by_username(username).await?)
    }

    pub async fn edit_profile(
        &self,
        user_id: Uuid,
        username: String,
        email: String,
    ) -> Result<User, DomainError> {
        validate_username(&username)?;
        validate_email(&email)?;

        if let Some(other) = self.repos.users.find_by_username(&username).await?
            && other.id != user_id
        {
            return Err(DomainError::Validation(
                "Username is already in use.".to_string(),
            ));
        }

        let mut user = self.find(user_id).await?;
        user.username = username;
        user.email = email;
        user.updated_at = self.clock.now();

        Ok(self.repos.users.update(user).await?)
    }

    /// Rows for the given users, in the order the ids were given.
    pub async fn export_users(&self, ids: &[Uuid]) -> Result<Vec<UserExportRow>, DomainError> {
        let by_id: HashMap<Uuid, User> = self
            .repos
            .users
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        ids.iter()
            .map(|id| {
                by_id
                    .get(id)
                    .cloned()
                    .map(UserExportRow::from)
                    .ok_or_else(|| DomainError::user_not_found(*id))
            })
            .collect()
    }
}
