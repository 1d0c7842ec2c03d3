use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use blog_common::date_time::UtcDateTime;
use blog_request::{filter::Filter, query::page::PageQuery, schema::SchemaMapped, value::Value};

use crate::{
    blog::model::BlogId,
    error::AppResult,
    user::{model::UserId, repository::UserRecord},
};

/// In-memory repository implementation.
pub mod memory;

/// `PostgreSQL` repository implementation.
pub mod postgres;

/// Filterable fields of a [`BlogWithAuthor`].
pub mod fields {
    pub const TITLE: &str = "title";
    pub const CONTENT: &str = "content";
    /// Tags joined with `,` into a single string.
    pub const TAGS: &str = "tags";
    pub const CREATED_AT: &str = "created_at";
    pub const AUTHOR_FIRST_NAME: &str = "author.first_name";
    pub const AUTHOR_LAST_NAME: &str = "author.last_name";
}

/// Separator used when tags are matched as one string.
pub const TAG_SEPARATOR: &str = ",";

/// Blog record for insertion operations.
#[derive(Debug)]
pub struct BlogRecordInsert {
    /// Unique identifier for the blog
    pub id: BlogId,
    /// Timestamp when the blog was created
    pub create_time: UtcDateTime,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image_urls: Vec<String>,
    /// Creating user
    pub author_id: UserId,
}

/// Complete blog record as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogRecordOwned {
    /// Unique identifier for the blog
    pub id: BlogId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image_urls: Vec<String>,
    /// Author reference; `None` once the author row is gone
    pub author_id: Option<UserId>,
    /// Timestamp when the blog was created
    pub create_time: UtcDateTime,
    /// Timestamp when the blog was last updated
    pub update_time: UtcDateTime,
}

/// Blog record for update operations.
///
/// Only provided fields are changed. The author is always replaced.
#[derive(Debug)]
pub struct BlogRecordUpdate<'a> {
    /// Unique identifier for the blog to update
    pub id: &'a BlogId,
    /// New update timestamp
    pub update_time: UtcDateTime,
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub tags: Option<&'a [String]>,
    pub image_urls: Option<&'a [String]>,
    /// New author
    pub author_id: UserId,
}

/// Blog record joined with its author, if the author still resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogWithAuthor {
    pub blog: BlogRecordOwned,
    pub author: Option<UserRecord>,
}

/// A page of joined blog records.
#[derive(Debug, Clone, Default)]
pub struct BlogRecordPage {
    /// Records of the requested page, oldest first
    pub items: Vec<BlogWithAuthor>,
    /// Number of records matching the filter across all pages
    pub total_size: u64,
}

/// Repository trait for blog data operations.
#[async_trait]
pub trait BlogRepository: Debug {
    /// Inserts a new blog record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insertion fails.
    async fn insert(&self, record: BlogRecordInsert) -> AppResult<()>;

    /// Updates an existing blog record.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// Returns `true` if a record was updated, `false` if not found.
    async fn update(&self, update: BlogRecordUpdate<'_>) -> AppResult<bool>;

    /// Selects a blog record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select(&self, id: &BlogId) -> AppResult<Option<BlogRecordOwned>>;

    /// Selects a blog record by ID, joined with its author.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select_with_author(&self, id: &BlogId) -> AppResult<Option<BlogWithAuthor>>;

    /// Deletes a blog record.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails.
    ///
    /// # Returns
    ///
    /// Returns `true` if a record was deleted, `false` if not found.
    async fn delete(&self, id: &BlogId) -> AppResult<bool>;

    /// Selects one page of joined records matching the filter, ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection fails.
    async fn select_page(&self, filter: &Filter, page: &PageQuery) -> AppResult<BlogRecordPage>;
}

/// Thread-safe shared reference to a blog repository.
pub type BlogRepositoryArc = Arc<dyn BlogRepository + Send + Sync>;

impl SchemaMapped for BlogWithAuthor {
    fn get_field(&self, name: &str) -> Value {
        match name {
            fields::TITLE => self.blog.title.clone().into(),
            fields::CONTENT => self.blog.content.clone().into(),
            fields::TAGS => self.blog.tags.join(TAG_SEPARATOR).into(),
            fields::CREATED_AT => self.blog.create_time.into(),
            fields::AUTHOR_FIRST_NAME => self
                .author
                .as_ref()
                .map(|author| author.first_name.clone())
                .into(),
            fields::AUTHOR_LAST_NAME => self
                .author
                .as_ref()
                .map(|author| author.last_name.clone())
                .into(),
            _ => Value::Null,
        }
    }
}
