use tracing::info;

use crate::{
    blog::{model::BlogId, repository::BlogRepositoryArc},
    error::{AppError, AppResult},
};

pub const BLOG_POST_DOES_NOT_EXIST: &str = "Blog post with this id does not exist.";

/// Deletes blogs by id. Any caller may delete any blog.
#[derive(Debug, Clone)]
pub struct DeleteBlogCommand {
    blog_repository: BlogRepositoryArc,
}

impl DeleteBlogCommand {
    pub fn new(blog_repository: BlogRepositoryArc) -> Self {
        Self { blog_repository }
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the blog does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: &BlogId) -> AppResult<()> {
        let deleted = self.blog_repository.delete(id).await?;

        if !deleted {
            return Err(AppError::not_found(BLOG_POST_DOES_NOT_EXIST));
        }
        info!(blog_id = %id, "blog deleted");

        Ok(())
    }
}
