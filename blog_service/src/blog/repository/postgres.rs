use std::sync::LazyLock;

use async_trait::async_trait;
use blog_request::{
    filter::Filter,
    query::page::PageQuery,
    sql::{SqlDialect, SqlFilterBuilder, SqlRenameMap},
    value::Value,
};
use sqlx::{
    PgPool, Postgres, Row,
    postgres::{PgArguments, PgRow},
    query::Query,
};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::{
    blog::{
        model::BlogId,
        repository::{
            BlogRecordInsert, BlogRecordOwned, BlogRecordPage, BlogRecordUpdate, BlogRepository,
            BlogWithAuthor, fields,
        },
    },
    database::{id_to_uuid, uuid_to_id},
    error::AppResult,
    user::{model::UserId, repository::UserRecord},
};

const BLOG_COLUMNS: &str = "b.id, b.title, b.content, b.tags, b.image_urls, b.author_id, \
                            b.created_at, b.updated_at";

const AUTHOR_COLUMNS: &str = "u.id AS user_id, u.first_name, u.last_name";

static RENAME_MAP: LazyLock<SqlRenameMap> = LazyLock::new(|| {
    [
        (fields::TITLE, "b.title"),
        (fields::CONTENT, "b.content"),
        (fields::TAGS, "array_to_string(b.tags, ',')"),
        (fields::CREATED_AT, "b.created_at"),
        (fields::AUTHOR_FIRST_NAME, "u.first_name"),
        (fields::AUTHOR_LAST_NAME, "u.last_name"),
    ]
    .into_iter()
    .collect()
});

/// `PostgreSQL` implementation of the blog repository.
///
/// Expects the `blogs` and `users` tables created by [`crate::database::ensure_schema`].
#[derive(Debug, Clone)]
pub struct PostgresBlogRepository {
    pool: PgPool,
}

impl PostgresBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &Value,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        Value::Integer(value) => query.bind(*value),
        Value::String(value) => query.bind(value.clone()),
        Value::Timestamp(value) => query.bind(OffsetDateTime::from(*value)),
        Value::Null => query.bind(None::<String>),
    }
}

fn blog_from_row(row: &PgRow) -> Result<BlogRecordOwned, sqlx::Error> {
    Ok(BlogRecordOwned {
        id: BlogId::new(uuid_to_id(row.try_get::<Uuid, _>("id")?)),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        tags: row.try_get("tags")?,
        image_urls: row.try_get("image_urls")?,
        author_id: row
            .try_get::<Option<Uuid>, _>("author_id")?
            .map(|id| UserId::new(uuid_to_id(id))),
        create_time: row.try_get::<OffsetDateTime, _>("created_at")?.into(),
        update_time: row.try_get::<OffsetDateTime, _>("updated_at")?.into(),
    })
}

fn joined_from_row(row: &PgRow) -> Result<BlogWithAuthor, sqlx::Error> {
    let author = match row.try_get::<Option<Uuid>, _>("user_id")? {
        Some(user_id) => Some(UserRecord {
            id: UserId::new(uuid_to_id(user_id)),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
        }),
        None => None,
    };
    Ok(BlogWithAuthor {
        blog: blog_from_row(row)?,
        author,
    })
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn insert(&self, record: BlogRecordInsert) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO blogs (id, title, content, tags, image_urls, author_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)",
        )
        .bind(id_to_uuid(record.id.0))
        .bind(record.title)
        .bind(record.content)
        .bind(record.tags)
        .bind(record.image_urls)
        .bind(id_to_uuid(record.author_id.0))
        .bind(OffsetDateTime::from(record.create_time))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, update: BlogRecordUpdate<'_>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE blogs SET \
             title = COALESCE($2, title), \
             content = COALESCE($3, content), \
             tags = COALESCE($4, tags), \
             image_urls = COALESCE($5, image_urls), \
             author_id = $6, \
             updated_at = GREATEST($7, created_at) \
             WHERE id = $1",
        )
        .bind(id_to_uuid(update.id.0))
        .bind(update.title)
        .bind(update.content)
        .bind(update.tags.map(<[String]>::to_vec))
        .bind(update.image_urls.map(<[String]>::to_vec))
        .bind(id_to_uuid(update.author_id.0))
        .bind(OffsetDateTime::from(update.update_time))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn select(&self, id: &BlogId) -> AppResult<Option<BlogRecordOwned>> {
        let row = sqlx::query(&format!("SELECT {BLOG_COLUMNS} FROM blogs b WHERE b.id = $1"))
            .bind(id_to_uuid(id.0))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(blog_from_row).transpose()?)
    }

    async fn select_with_author(&self, id: &BlogId) -> AppResult<Option<BlogWithAuthor>> {
        let row = sqlx::query(&format!(
            "SELECT {BLOG_COLUMNS}, {AUTHOR_COLUMNS} FROM blogs b \
             LEFT JOIN users u ON u.id = b.author_id WHERE b.id = $1"
        ))
        .bind(id_to_uuid(id.0))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(joined_from_row).transpose()?)
    }

    async fn delete(&self, id: &BlogId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id_to_uuid(id.0))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn select_page(&self, filter: &Filter, page: &PageQuery) -> AppResult<BlogRecordPage> {
        let (condition, arguments) = SqlFilterBuilder::new(SqlDialect::Postgres)
            .set_rename_map(&RENAME_MAP)
            .build(filter);
        debug!(%condition, "selecting blog page");

        let count_sql = format!(
            "SELECT COUNT(*) FROM blogs b LEFT JOIN users u ON u.id = b.author_id WHERE {condition}"
        );
        let count_query = arguments
            .iter()
            .fold(sqlx::query(&count_sql), bind_value);
        let total_size: i64 = count_query.fetch_one(&self.pool).await?.try_get(0)?;

        let page_sql = format!(
            "SELECT {BLOG_COLUMNS}, {AUTHOR_COLUMNS} FROM blogs b \
             LEFT JOIN users u ON u.id = b.author_id WHERE {condition} \
             ORDER BY b.created_at, b.id LIMIT ${} OFFSET ${}",
            arguments.len() + 1,
            arguments.len() + 2,
        );
        let rows = arguments
            .iter()
            .fold(sqlx::query(&page_sql), bind_value)
            .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
            .bind(i64::try_from(page.skip()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        Ok(BlogRecordPage {
            items: rows
                .iter()
                .map(joined_from_row)
                .collect::<Result<_, _>>()?,
            total_size: u64::try_from(total_size).unwrap_or_default(),
        })
    }
}
