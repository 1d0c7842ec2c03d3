use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    user::{
        model::UserId,
        repository::{UserRecord, UserRepository},
    },
};

/// In-memory implementation of the user repository.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new memory repository with initial data.
    pub fn with_data(users: Vec<UserRecord>) -> Self {
        Self {
            users: Arc::new(RwLock::new(
                users.into_iter().map(|user| (user.id, user)).collect(),
            )),
        }
    }

    /// Adds or replaces a user. Used to seed fixtures.
    pub async fn put(&self, user: UserRecord) {
        self.users.write().await.insert(user.id, user);
    }

    /// Removes a user, leaving any blogs that reference it dangling.
    pub async fn remove(&self, id: &UserId) -> Option<UserRecord> {
        self.users.write().await.remove(id)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn select(&self, id: &UserId) -> AppResult<Option<UserRecord>> {
        Ok(self.users.read().await.get(id).cloned())
    }
}
