use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::{
    database::{id_to_uuid, uuid_to_id},
    error::AppResult,
    user::{
        model::UserId,
        repository::{UserRecord, UserRepository},
    },
};

/// `PostgreSQL` implementation of the user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn select(&self, id: &UserId) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT id, first_name, last_name FROM users WHERE id = $1")
            .bind(id_to_uuid(id.0))
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| -> AppResult<UserRecord> {
            Ok(UserRecord {
                id: UserId::new(uuid_to_id(row.try_get::<Uuid, _>("id")?)),
                first_name: row.try_get("first_name")?,
                last_name: row.try_get("last_name")?,
            })
        })
        .transpose()
    }
}
