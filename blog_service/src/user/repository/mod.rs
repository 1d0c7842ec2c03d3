use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use crate::{error::AppResult, user::model::UserId};

/// In-memory repository implementation.
pub mod memory;

/// `PostgreSQL` repository implementation.
pub mod postgres;

/// Name fields of a user record.
///
/// Other user columns exist in the store but are never read here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
}

impl UserRecord {
    /// Author display string, `"{first_name} {last_name}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Read-only access to users.
#[async_trait]
pub trait UserRepository: Debug {
    /// Selects the name fields of a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select(&self, id: &UserId) -> AppResult<Option<UserRecord>>;
}

pub type UserRepositoryArc = Arc<dyn UserRepository + Send + Sync>;
