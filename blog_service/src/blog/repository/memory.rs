use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use blog_request::{filter::Filter, query::page::PageQuery};
use itertools::Itertools;
use tokio::sync::RwLock;

use crate::{
    blog::{
        model::BlogId,
        repository::{
            BlogRecordInsert, BlogRecordOwned, BlogRecordPage, BlogRecordUpdate, BlogRepository,
            BlogWithAuthor,
        },
    },
    error::AppResult,
    user::repository::UserRepositoryArc,
};

/// In-memory implementation of the blog repository.
///
/// Authors are joined through the given user repository at read time, so removing a user
/// leaves its blogs without an author.
#[derive(Debug)]
pub struct MemoryBlogRepository {
    blogs: Arc<RwLock<HashMap<BlogId, BlogRecordOwned>>>,
    user_repository: UserRepositoryArc,
}

impl MemoryBlogRepository {
    /// Creates a new empty memory blog repository.
    pub fn new(user_repository: UserRepositoryArc) -> Self {
        Self::with_data(user_repository, Vec::new())
    }

    /// Creates a new memory blog repository with initial data.
    pub fn with_data(user_repository: UserRepositoryArc, blogs: Vec<BlogRecordOwned>) -> Self {
        Self {
            blogs: Arc::new(RwLock::new(
                blogs.into_iter().map(|blog| (blog.id, blog)).collect(),
            )),
            user_repository,
        }
    }

    async fn join_author(&self, blog: BlogRecordOwned) -> AppResult<BlogWithAuthor> {
        let author = match &blog.author_id {
            Some(author_id) => self.user_repository.select(author_id).await?,
            None => None,
        };
        Ok(BlogWithAuthor { blog, author })
    }
}

#[async_trait]
impl BlogRepository for MemoryBlogRepository {
    async fn insert(&self, record: BlogRecordInsert) -> AppResult<()> {
        self.blogs.write().await.insert(
            record.id,
            BlogRecordOwned {
                id: record.id,
                title: record.title,
                content: record.content,
                tags: record.tags,
                image_urls: record.image_urls,
                author_id: Some(record.author_id),
                create_time: record.create_time,
                update_time: record.create_time,
            },
        );
        Ok(())
    }

    async fn update(&self, update: BlogRecordUpdate<'_>) -> AppResult<bool> {
        let mut blogs = self.blogs.write().await;
        let Some(blog) = blogs.get_mut(update.id) else {
            return Ok(false);
        };
        if let Some(title) = update.title {
            blog.title = title.to_string();
        }
        if let Some(content) = update.content {
            blog.content = content.to_string();
        }
        if let Some(tags) = update.tags {
            blog.tags = tags.to_vec();
        }
        if let Some(image_urls) = update.image_urls {
            blog.image_urls = image_urls.to_vec();
        }
        blog.author_id = Some(update.author_id);
        blog.update_time = update.update_time.max(blog.create_time);
        Ok(true)
    }

    async fn select(&self, id: &BlogId) -> AppResult<Option<BlogRecordOwned>> {
        Ok(self.blogs.read().await.get(id).cloned())
    }

    async fn select_with_author(&self, id: &BlogId) -> AppResult<Option<BlogWithAuthor>> {
        let blog = self.blogs.read().await.get(id).cloned();
        match blog {
            Some(blog) => Ok(Some(self.join_author(blog).await?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &BlogId) -> AppResult<bool> {
        Ok(self.blogs.write().await.remove(id).is_some())
    }

    async fn select_page(&self, filter: &Filter, page: &PageQuery) -> AppResult<BlogRecordPage> {
        let blogs: Vec<_> = self
            .blogs
            .read()
            .await
            .values()
            .sorted_unstable_by_key(|blog| (blog.create_time, blog.id))
            .cloned()
            .collect();

        let mut matched = Vec::new();
        for blog in blogs {
            let row = self.join_author(blog).await?;
            if filter.evaluate(&row) {
                matched.push(row);
            }
        }

        Ok(BlogRecordPage {
            total_size: matched.len() as u64,
            items: page.slice(matched).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use blog_common::{date_time::UtcDateTime, id::Id};

    use super::*;
    use crate::{
        blog::repository::fields,
        user::{
            model::UserId,
            repository::{UserRecord, memory::MemoryUserRepository},
        },
    };

    fn blog(seconds: i64, title: &str, author_id: UserId) -> BlogRecordOwned {
        let created = UtcDateTime::from_seconds(seconds).unwrap();
        BlogRecordOwned {
            id: BlogId::new(Id::generate()),
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
            image_urls: Vec::new(),
            author_id: Some(author_id),
            create_time: created,
            update_time: created,
        }
    }

    #[tokio::test]
    async fn select_page() {
        let author_id = UserId::new(Id::generate());
        let users = Arc::new(MemoryUserRepository::with_data(vec![UserRecord {
            id: author_id,
            first_name: "Jane".into(),
            last_name: "Janssen".into(),
        }]));
        let repository = MemoryBlogRepository::with_data(
            users,
            vec![
                blog(30, "third rust", author_id),
                blog(10, "first rust", author_id),
                blog(20, "second go", author_id),
            ],
        );

        let page = repository
            .select_page(
                &Filter::new().contains(fields::TITLE, "rust"),
                &PageQuery::new(1, 1),
            )
            .await
            .unwrap();
        assert_eq!(page.total_size, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].blog.title, "first rust");
        assert_eq!(
            page.items[0].author.as_ref().unwrap().full_name(),
            "Jane Janssen"
        );

        let page = repository
            .select_page(&Filter::new(), &PageQuery::new(2, 2))
            .await
            .unwrap();
        assert_eq!(page.total_size, 3);
        assert_eq!(page.items[0].blog.title, "third rust");
    }

    #[tokio::test]
    async fn dangling_author() {
        let author_id = UserId::new(Id::generate());
        let users = Arc::new(MemoryUserRepository::new());
        let record = blog(10, "orphan", author_id);
        let id = record.id;
        let repository = MemoryBlogRepository::with_data(users, vec![record]);

        let row = repository.select_with_author(&id).await.unwrap().unwrap();
        assert!(row.author.is_none());

        assert!(repository.delete(&id).await.unwrap());
        assert!(!repository.delete(&id).await.unwrap());
        assert!(repository.select_with_author(&id).await.unwrap().is_none());
    }
}
