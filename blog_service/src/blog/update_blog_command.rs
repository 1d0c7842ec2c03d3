use blog_common::date_time::UtcDateTime;
use tracing::info;

use crate::{
    blog::{
        model::{BlogId, BlogResponse, ResolvedBlog},
        repository::{BlogRecordUpdate, BlogRepositoryArc},
    },
    error::{AppError, AppResult},
    user::{model::RequestingUser, query_manager::UserQueryManager},
};

pub const BLOG_POST_NOT_FOUND: &str = "Blog post not found.";

#[derive(Debug, Clone)]
pub struct UpdateBlogCommand {
    blog_repository: BlogRepositoryArc,
    user_query_manager: UserQueryManager,
}

/// Fields to overwrite. Absent fields keep their stored value.
#[derive(Debug, Default)]
pub struct UpdateBlogCommandInput<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub tags: Option<&'a [String]>,
    pub image_urls: Option<&'a [String]>,
}

#[derive(Debug)]
pub struct UpdateBlogCommandResult {
    pub blog: BlogResponse,
}

impl UpdateBlogCommand {
    pub fn new(blog_repository: BlogRepositoryArc, user_query_manager: UserQueryManager) -> Self {
        Self {
            blog_repository,
            user_query_manager,
        }
    }

    /// Overwrites the given fields and makes the requesting user the author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the blog or the requesting user does not exist.
    #[tracing::instrument(skip(self, input), fields(user_id = %requesting_user.id))]
    pub async fn execute(
        &self,
        id: &BlogId,
        requesting_user: &RequestingUser,
        input: UpdateBlogCommandInput<'_>,
    ) -> AppResult<UpdateBlogCommandResult> {
        let existing = self
            .blog_repository
            .select(id)
            .await?
            .ok_or_else(|| AppError::not_found(BLOG_POST_NOT_FOUND))?;
        let author = self
            .user_query_manager
            .query_single(&requesting_user.id)
            .await?;

        let updated = self
            .blog_repository
            .update(BlogRecordUpdate {
                id,
                update_time: UtcDateTime::now(),
                title: input.title,
                content: input.content,
                tags: input.tags,
                image_urls: input.image_urls,
                author_id: author.id,
            })
            .await?;
        if !updated {
            return Err(AppError::not_found(BLOG_POST_NOT_FOUND));
        }
        info!(
            blog_id = %id,
            previous_author = ?existing.author_id,
            "blog updated"
        );

        let row = self
            .blog_repository
            .select_with_author(id)
            .await?
            .ok_or_else(|| AppError::not_found(BLOG_POST_NOT_FOUND))?;
        let blog = ResolvedBlog::resolve(row).require_author()?;

        Ok(UpdateBlogCommandResult { blog })
    }
}
