use std::sync::Arc;

use blog_common::{date_time::UtcDateTime, id::worker::WorkerIdGenerator};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    blog::{
        model::{BlogId, BlogResponse, ResolvedBlog},
        repository::{BlogRecordInsert, BlogRepositoryArc},
    },
    error::{AppError, AppResult},
    user::{model::RequestingUser, query_manager::UserQueryManager},
};

#[derive(Debug, Clone)]
pub struct CreateBlogCommand {
    id_generator: Arc<Mutex<WorkerIdGenerator>>,
    blog_repository: BlogRepositoryArc,
    user_query_manager: UserQueryManager,
}

#[derive(Debug)]
pub struct CreateBlogCommandInput<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub tags: &'a [String],
    pub image_urls: &'a [String],
}

#[derive(Debug)]
pub struct CreateBlogCommandResult {
    pub blog: BlogResponse,
}

impl CreateBlogCommand {
    pub fn new(
        id_generator: Arc<Mutex<WorkerIdGenerator>>,
        blog_repository: BlogRepositoryArc,
        user_query_manager: UserQueryManager,
    ) -> Self {
        Self {
            id_generator,
            blog_repository,
            user_query_manager,
        }
    }

    /// Creates a blog owned by the requesting user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the requesting user does not exist.
    #[tracing::instrument(skip(self, input), fields(user_id = %requesting_user.id))]
    pub async fn execute(
        &self,
        requesting_user: &RequestingUser,
        input: CreateBlogCommandInput<'_>,
    ) -> AppResult<CreateBlogCommandResult> {
        let author = self
            .user_query_manager
            .query_single(&requesting_user.id)
            .await?;

        let id = BlogId::new(self.id_generator.lock().await.generate());
        self.blog_repository
            .insert(BlogRecordInsert {
                id,
                create_time: UtcDateTime::now(),
                title: input.title.into(),
                content: input.content.into(),
                tags: input.tags.to_vec(),
                image_urls: input.image_urls.to_vec(),
                author_id: author.id,
            })
            .await?;
        info!(blog_id = %id, "blog created");

        let row = self
            .blog_repository
            .select_with_author(&id)
            .await?
            .ok_or_else(|| AppError::Integrity(format!("blog `{id}` vanished after insert")))?;
        let blog = ResolvedBlog::resolve(row).require_author()?;

        Ok(CreateBlogCommandResult { blog })
    }
}
