use blog_request::{filter::Filter, query::page::PageQuery};
use tracing::debug;

use crate::{
    blog::{
        model::{BlogId, BlogPage, ResolvedBlog, SingleBlogResponse},
        observer::BlogObserverArc,
        repository::{BlogRecordPage, BlogRepositoryArc},
        search_query::BlogSearchQuery,
    },
    config::SearchConfig,
    error::{AppError, AppResult},
    user::{model::RequestingUser, query_manager::UserQueryManager},
};

pub const BLOG_NOT_FOUND: &str = "Blog not found.";

#[derive(Debug, Clone)]
pub struct BlogQueryManager {
    blog_repository: BlogRepositoryArc,
    user_query_manager: UserQueryManager,
    observer: BlogObserverArc,
    search_config: SearchConfig,
}

impl BlogQueryManager {
    pub fn new(
        blog_repository: BlogRepositoryArc,
        user_query_manager: UserQueryManager,
        observer: BlogObserverArc,
        search_config: SearchConfig,
    ) -> Self {
        Self {
            blog_repository,
            user_query_manager,
            observer,
            search_config,
        }
    }

    /// Reads one blog. The author shown is the requesting user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the blog or the requesting user does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn query_single(
        &self,
        id: &BlogId,
        requesting_user: &RequestingUser,
    ) -> AppResult<SingleBlogResponse> {
        let Some(blog) = self.blog_repository.select(id).await? else {
            self.observer.on_blog_not_found(id);
            return Err(AppError::not_found(BLOG_NOT_FOUND));
        };
        let user = self
            .user_query_manager
            .query_single(&requesting_user.id)
            .await?;

        Ok(SingleBlogResponse::fetched(blog, user.full_name()))
    }

    /// Lists all blogs, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    #[tracing::instrument(skip(self))]
    pub async fn query_page(&self, page: PageQuery) -> AppResult<BlogPage> {
        let records = self
            .blog_repository
            .select_page(&Filter::new(), &page)
            .await?;
        Ok(self.to_page(records))
    }

    /// Lists blogs matching every given criterion.
    ///
    /// A page without matches yields an empty result with a zero total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a criterion is blank or malformed.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &BlogSearchQuery) -> AppResult<BlogPage> {
        let filter = query.to_filter(self.search_config.case_insensitive)?;
        let page = query.page_query(self.search_config.default_page_size);
        debug!(%filter, ?page, "searching blogs");

        let records = self.blog_repository.select_page(&filter, &page).await?;
        if records.items.is_empty() {
            self.observer.on_empty_search(query);
            return Ok(BlogPage::default());
        }

        Ok(self.to_page(records))
    }

    fn to_page(&self, records: BlogRecordPage) -> BlogPage {
        BlogPage {
            data: records
                .items
                .into_iter()
                .map(|row| {
                    let resolved = ResolvedBlog::resolve(row);
                    if let ResolvedBlog::WithPlaceholder(blog) = &resolved {
                        self.observer.on_missing_author(&blog.blog_id);
                    }
                    resolved.into_response()
                })
                .collect(),
            total: records.total_size,
        }
    }
}
