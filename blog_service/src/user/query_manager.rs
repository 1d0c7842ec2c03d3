use crate::{
    error::{AppError, AppResult},
    user::{
        model::UserId,
        repository::{UserRecord, UserRepositoryArc},
    },
};

pub const USER_NOT_FOUND: &str = "User not found.";

#[derive(Debug, Clone)]
pub struct UserQueryManager {
    user_repository: UserRepositoryArc,
}

impl UserQueryManager {
    pub fn new(user_repository: UserRepositoryArc) -> Self {
        Self { user_repository }
    }

    /// Resolves the name fields of a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn query_single(&self, id: &UserId) -> AppResult<UserRecord> {
        self.user_repository
            .select(id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }
}
