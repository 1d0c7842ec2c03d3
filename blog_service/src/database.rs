//! `PostgreSQL` connection handling shared by the Postgres repositories.

use std::time::Duration;

use blog_common::id::Id;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;
use uuid::Uuid;

use crate::{config::PostgresConfig, error::AppResult};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL
)
"#;

const CREATE_BLOGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS blogs (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    tags TEXT[] NOT NULL DEFAULT '{}',
    image_urls TEXT[] NOT NULL DEFAULT '{}',
    author_id UUID REFERENCES users (id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_BLOGS_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS blogs_created_at_id_idx ON blogs (created_at, id)";

/// Opens a connection pool.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn connect(config: &PostgresConfig) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.connection)
        .await?;

    if config.ensure_schema {
        ensure_schema(&pool).await?;
    }

    Ok(pool)
}

/// Creates the `users` and `blogs` tables if they do not exist yet.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub async fn ensure_schema(pool: &PgPool) -> AppResult<()> {
    for statement in [
        CREATE_USERS_TABLE,
        CREATE_BLOGS_TABLE,
        CREATE_BLOGS_CREATED_AT_INDEX,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("database schema ensured");
    Ok(())
}

pub(crate) fn id_to_uuid(id: Id) -> Uuid {
    Uuid::from_u128(id.value())
}

pub(crate) fn uuid_to_id(uuid: Uuid) -> Id {
    Id::new(uuid.as_u128())
}
