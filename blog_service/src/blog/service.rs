use std::sync::Arc;

use blog_common::id::worker::WorkerIdGenerator;
use blog_request::query::page::PageQuery;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    blog::{
        create_blog_command::{CreateBlogCommand, CreateBlogCommandInput},
        delete_blog_command::DeleteBlogCommand,
        model::{BlogId, BlogPage, BlogResponse, SingleBlogResponse},
        observer::{BlogObserverArc, TracingObserver},
        query_manager::BlogQueryManager,
        repository::{
            BlogRepositoryArc, memory::MemoryBlogRepository, postgres::PostgresBlogRepository,
        },
        search_query::BlogSearchQuery,
        update_blog_command::{UpdateBlogCommand, UpdateBlogCommandInput},
    },
    config::{AppConfig, DatabaseConfig, SearchConfig},
    database,
    error::AppResult,
    user::{
        model::RequestingUser,
        query_manager::UserQueryManager,
        repository::{
            UserRepositoryArc, memory::MemoryUserRepository, postgres::PostgresUserRepository,
        },
    },
};

/// Entry point for every blog operation.
#[derive(Debug)]
pub struct BlogService {
    blog_query_manager: BlogQueryManager,
    create_blog_command: CreateBlogCommand,
    update_blog_command: UpdateBlogCommand,
    delete_blog_command: DeleteBlogCommand,
}

impl BlogService {
    pub fn new(
        blog_query_manager: BlogQueryManager,
        create_blog_command: CreateBlogCommand,
        update_blog_command: UpdateBlogCommand,
        delete_blog_command: DeleteBlogCommand,
    ) -> Self {
        Self {
            blog_query_manager,
            create_blog_command,
            update_blog_command,
            delete_blog_command,
        }
    }

    /// Wires commands and queries over the given stores.
    pub fn with_repositories(
        blog_repository: BlogRepositoryArc,
        user_repository: UserRepositoryArc,
        id_generator: WorkerIdGenerator,
        observer: BlogObserverArc,
        search_config: SearchConfig,
    ) -> Self {
        let user_query_manager = UserQueryManager::new(user_repository);
        let id_generator = Arc::new(Mutex::new(id_generator));

        Self::new(
            BlogQueryManager::new(
                blog_repository.clone(),
                user_query_manager.clone(),
                observer,
                search_config,
            ),
            CreateBlogCommand::new(
                id_generator,
                blog_repository.clone(),
                user_query_manager.clone(),
            ),
            UpdateBlogCommand::new(blog_repository.clone(), user_query_manager),
            DeleteBlogCommand::new(blog_repository),
        )
    }

    /// Builds the service from configuration, connecting to `PostgreSQL` if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let blog_repository: BlogRepositoryArc;
        let user_repository: UserRepositoryArc;
        match &config.database {
            DatabaseConfig::Memory => {
                user_repository = Arc::new(MemoryUserRepository::new());
                blog_repository = Arc::new(MemoryBlogRepository::new(user_repository.clone()));
            }
            DatabaseConfig::Postgres(postgres_config) => {
                let pool = database::connect(postgres_config).await?;
                blog_repository = Arc::new(PostgresBlogRepository::new(pool.clone()));
                user_repository = Arc::new(PostgresUserRepository::new(pool));
            }
        }
        info!(
            name = %config.distribution.name,
            worker = config.node.worker_number,
            "blog service configured"
        );

        Ok(Self::with_repositories(
            blog_repository,
            user_repository,
            WorkerIdGenerator::new(config.node.worker_number),
            Arc::new(TracingObserver),
            config.search.clone(),
        ))
    }

    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] if the requesting user does not exist.
    pub async fn create_blog(
        &self,
        input: CreateBlogCommandInput<'_>,
        requesting_user: &RequestingUser,
    ) -> AppResult<BlogResponse> {
        Ok(self
            .create_blog_command
            .execute(requesting_user, input)
            .await?
            .blog)
    }

    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] if the blog or the requesting user does
    /// not exist.
    pub async fn get_single_blog(
        &self,
        id: &BlogId,
        requesting_user: &RequestingUser,
    ) -> AppResult<SingleBlogResponse> {
        self.blog_query_manager
            .query_single(id, requesting_user)
            .await
    }

    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] if the blog or the requesting user does
    /// not exist.
    pub async fn update_blog(
        &self,
        id: &BlogId,
        input: UpdateBlogCommandInput<'_>,
        requesting_user: &RequestingUser,
    ) -> AppResult<BlogResponse> {
        Ok(self
            .update_blog_command
            .execute(id, requesting_user, input)
            .await?
            .blog)
    }

    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] if the blog does not exist.
    pub async fn delete_blog_post(&self, id: &BlogId) -> AppResult<()> {
        self.delete_blog_command.execute(id).await
    }

    /// Lists all blogs using 1-based pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn get_all_blogs(&self, page: u32, page_size: u32) -> AppResult<BlogPage> {
        self.blog_query_manager
            .query_page(PageQuery::new(page, page_size))
            .await
    }

    /// # Errors
    ///
    /// Returns [`crate::error::AppError::Validation`] if a criterion is blank or malformed.
    pub async fn search_blogs(&self, query: &BlogSearchQuery) -> AppResult<BlogPage> {
        self.blog_query_manager.search(query).await
    }
}
