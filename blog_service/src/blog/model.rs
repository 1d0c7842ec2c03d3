use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use blog_common::{
    date_time::UtcDateTime,
    id::{Id, ParseIdError},
};
use serde::{Deserialize, Serialize};

use crate::{
    blog::repository::{BlogRecordOwned, BlogWithAuthor},
    error::{AppError, AppResult},
};

/// Author shown when a listed blog's author cannot be resolved.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

pub const AUTHOR_NOT_FOUND: &str = "Author not found";

pub const BLOG_FETCHED_SUCCESSFULLY: &str = "Blog fetched successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogId(pub Id);

impl BlogId {
    pub const fn new(id: Id) -> Self {
        Self(id)
    }
}

impl Display for BlogId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BlogId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Blog as returned to callers, with the author rendered as a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogResponse {
    pub blog_id: BlogId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image_urls: Vec<String>,
    pub author: String,
    pub created_at: UtcDateTime,
}

impl BlogResponse {
    pub fn new(blog: BlogRecordOwned, author: String) -> Self {
        Self {
            blog_id: blog.id,
            title: blog.title,
            content: blog.content,
            tags: blog.tags,
            image_urls: blog.image_urls,
            author,
            created_at: blog.create_time,
        }
    }
}

/// Outcome of rendering a blog row together with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedBlog {
    /// The author relation resolved to a user.
    WithAuthor(BlogResponse),
    /// The author relation was missing and [`UNKNOWN_AUTHOR`] was substituted.
    WithPlaceholder(BlogResponse),
}

impl ResolvedBlog {
    pub fn resolve(row: BlogWithAuthor) -> Self {
        match row.author {
            Some(author) => Self::WithAuthor(BlogResponse::new(row.blog, author.full_name())),
            None => Self::WithPlaceholder(BlogResponse::new(row.blog, UNKNOWN_AUTHOR.into())),
        }
    }

    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::WithPlaceholder(_))
    }

    /// Takes the response, placeholder or not. Used by listing paths.
    pub fn into_response(self) -> BlogResponse {
        match self {
            Self::WithAuthor(response) | Self::WithPlaceholder(response) => response,
        }
    }

    /// Takes the response only if the author resolved. Used by single-record paths.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Integrity`] for a placeholder.
    pub fn require_author(self) -> AppResult<BlogResponse> {
        match self {
            Self::WithAuthor(response) => Ok(response),
            Self::WithPlaceholder(_) => Err(AppError::Integrity(AUTHOR_NOT_FOUND.into())),
        }
    }
}

/// A page of blogs and the number of blogs matching the query overall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlogPage {
    pub data: Vec<BlogResponse>,
    pub total: u64,
}

/// Envelope returned by a single blog read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SingleBlogResponse {
    pub status: u16,
    pub message: String,
    pub data: SingleBlogData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SingleBlogData {
    pub blog_id: BlogId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image_urls: Vec<String>,
    pub author: String,
    pub published_date: UtcDateTime,
}

impl SingleBlogResponse {
    pub fn fetched(blog: BlogRecordOwned, author: String) -> Self {
        Self {
            status: 200,
            message: BLOG_FETCHED_SUCCESSFULLY.into(),
            data: SingleBlogData {
                blog_id: blog.id,
                title: blog.title,
                content: blog.content,
                tags: blog.tags,
                image_urls: blog.image_urls,
                author,
                published_date: blog.create_time,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{model::UserId, repository::UserRecord};

    fn record() -> BlogRecordOwned {
        let created = UtcDateTime::from_seconds(1_700_000_000).unwrap();
        BlogRecordOwned {
            id: BlogId::new(Id::new(7)),
            title: "Title".into(),
            content: "Content".into(),
            tags: vec!["a".into(), "b".into()],
            image_urls: vec!["https://img/1.png".into()],
            author_id: None,
            create_time: created,
            update_time: created,
        }
    }

    #[test]
    fn placeholder_only_in_bulk() {
        let resolved = ResolvedBlog::resolve(BlogWithAuthor {
            blog: record(),
            author: None,
        });
        assert!(resolved.is_placeholder());
        assert_eq!(resolved.clone().into_response().author, UNKNOWN_AUTHOR);
        assert!(matches!(
            resolved.require_author(),
            Err(AppError::Integrity(message)) if message == AUTHOR_NOT_FOUND
        ));

        let author = UserRecord {
            id: UserId::new(Id::new(1)),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
        };
        let resolved = ResolvedBlog::resolve(BlogWithAuthor {
            blog: record(),
            author: Some(author),
        });
        assert_eq!(resolved.require_author().unwrap().author, "Jane Doe");
    }

    #[test]
    fn serialize_single() {
        let response = SingleBlogResponse::fetched(record(), "Jane Doe".into());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], 200);
        assert_eq!(json["message"], BLOG_FETCHED_SUCCESSFULLY);
        assert_eq!(json["data"]["blog_id"], BlogId::new(Id::new(7)).to_string());
        assert_eq!(json["data"]["author"], "Jane Doe");
        assert_eq!(json["data"]["published_date"], "2023-11-14T22:13:20Z");
        assert_eq!(json["data"]["tags"], serde_json::json!(["a", "b"]));
        assert!(json["data"].get("created_at").is_none());
    }
}
