use std::{path::Path, sync::Arc, sync::Mutex};

use blog_common::{date_time::UtcDateTime, id::Id, id::worker::WorkerIdGenerator};
use blog_service::{
    blog::{
        create_blog_command::CreateBlogCommandInput,
        delete_blog_command::BLOG_POST_DOES_NOT_EXIST,
        model::{BLOG_FETCHED_SUCCESSFULLY, BlogId, BlogResponse, UNKNOWN_AUTHOR},
        observer::BlogObserver,
        query_manager::BLOG_NOT_FOUND,
        repository::{BlogRecordOwned, memory::MemoryBlogRepository},
        search_query::BlogSearchQuery,
        service::BlogService,
        update_blog_command::{BLOG_POST_NOT_FOUND, UpdateBlogCommandInput},
    },
    config::{AppConfig, SearchConfig},
    error::AppError,
    tracing::tracer::Tracer,
    user::{
        model::{RequestingUser, UserId},
        query_manager::USER_NOT_FOUND,
        repository::{UserRecord, memory::MemoryUserRepository},
    },
};

#[derive(Debug, Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl BlogObserver for RecordingObserver {
    fn on_blog_not_found(&self, id: &BlogId) {
        self.events.lock().unwrap().push(format!("blog_not_found:{id}"));
    }

    fn on_missing_author(&self, id: &BlogId) {
        self.events
            .lock()
            .unwrap()
            .push(format!("missing_author:{id}"));
    }

    fn on_empty_search(&self, _query: &BlogSearchQuery) {
        self.events.lock().unwrap().push("empty_search".into());
    }
}

struct Fixture {
    service: BlogService,
    users: Arc<MemoryUserRepository>,
    observer: Arc<RecordingObserver>,
}

fn user(first_name: &str, last_name: &str) -> UserRecord {
    UserRecord {
        id: UserId::new(Id::generate()),
        first_name: first_name.into(),
        last_name: last_name.into(),
    }
}

fn requesting(user: &UserRecord) -> RequestingUser {
    RequestingUser::new(user.id)
}

fn fixture_with(
    users: Vec<UserRecord>,
    blogs: Vec<BlogRecordOwned>,
    search_config: SearchConfig,
) -> Fixture {
    let users = Arc::new(MemoryUserRepository::with_data(users));
    let observer = Arc::new(RecordingObserver::default());
    let service = BlogService::with_repositories(
        Arc::new(MemoryBlogRepository::with_data(users.clone(), blogs)),
        users.clone(),
        WorkerIdGenerator::new(1),
        observer.clone(),
        search_config,
    );
    Fixture {
        service,
        users,
        observer,
    }
}

fn fixture(users: Vec<UserRecord>) -> Fixture {
    fixture_with(users, Vec::new(), SearchConfig::default())
}

async fn create(fixture: &Fixture, author: &UserRecord, title: &str) -> BlogResponse {
    fixture
        .service
        .create_blog(
            CreateBlogCommandInput {
                title,
                content: "content",
                tags: &[],
                image_urls: &[],
            },
            &requesting(author),
        )
        .await
        .unwrap()
}

fn seeded_blog(title: &str, created: &str, author: &UserRecord) -> BlogRecordOwned {
    let created = UtcDateTime::parse_rfc3339(created).unwrap();
    BlogRecordOwned {
        id: BlogId::new(Id::generate()),
        title: title.into(),
        content: "content".into(),
        tags: Vec::new(),
        image_urls: Vec::new(),
        author_id: Some(author.id),
        create_time: created,
        update_time: created,
    }
}

fn titles(blogs: &[BlogResponse]) -> Vec<&str> {
    blogs.iter().map(|blog| blog.title.as_str()).collect()
}

#[tokio::test]
async fn create_blog() {
    let jane = user("Jane", "Doe");
    let fixture = fixture(vec![jane.clone()]);
    let tags = vec!["a".to_string(), "b".to_string()];
    let image_urls = vec!["https://img.example/1.png".to_string()];

    let blog = fixture
        .service
        .create_blog(
            CreateBlogCommandInput {
                title: "Hello",
                content: "World",
                tags: &tags,
                image_urls: &image_urls,
            },
            &requesting(&jane),
        )
        .await
        .unwrap();
    assert_eq!(blog.author, "Jane Doe");
    assert!(!blog.blog_id.to_string().is_empty());
    assert_eq!(blog.tags, tags);
    assert_eq!(blog.image_urls, image_urls);

    let page = fixture.service.get_all_blogs(1, 10).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].blog_id, blog.blog_id);
    assert_eq!(page.data[0].tags, vec!["a", "b"]);
}

#[tokio::test]
async fn create_blog_unknown_user() {
    let fixture = fixture(Vec::new());
    let err = fixture
        .service
        .create_blog(
            CreateBlogCommandInput {
                title: "Hello",
                content: "World",
                tags: &[],
                image_urls: &[],
            },
            &RequestingUser::new(UserId::new(Id::generate())),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref message) if message == USER_NOT_FOUND));
    assert_eq!(fixture.service.get_all_blogs(1, 10).await.unwrap().total, 0);
}

#[tokio::test]
async fn get_single_blog() {
    let jane = user("Jane", "Doe");
    let john = user("John", "Roe");
    let fixture = fixture(vec![jane.clone(), john.clone()]);
    let blog = create(&fixture, &jane, "Hello").await;

    let response = fixture
        .service
        .get_single_blog(&blog.blog_id, &requesting(&john))
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.message, BLOG_FETCHED_SUCCESSFULLY);
    assert_eq!(response.data.title, "Hello");
    assert_eq!(response.data.author, "John Roe");
    assert_eq!(response.data.published_date, blog.created_at);

    let missing = BlogId::new(Id::generate());
    let err = fixture
        .service
        .get_single_blog(&missing, &requesting(&jane))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref message) if message == BLOG_NOT_FOUND));
    assert_eq!(
        fixture.observer.events(),
        vec![format!("blog_not_found:{missing}")]
    );
}

#[tokio::test]
async fn update_blog_reassigns_author() {
    let jane = user("Jane", "Doe");
    let john = user("John", "Roe");
    let fixture = fixture(vec![jane.clone(), john.clone()]);
    let blog = create(&fixture, &jane, "Hello").await;

    let updated = fixture
        .service
        .update_blog(
            &blog.blog_id,
            UpdateBlogCommandInput {
                title: Some("Hello again"),
                ..Default::default()
            },
            &requesting(&john),
        )
        .await
        .unwrap();
    assert_eq!(updated.blog_id, blog.blog_id);
    assert_eq!(updated.title, "Hello again");
    assert_eq!(updated.content, "content");
    assert_eq!(updated.author, "John Roe");
    assert_eq!(updated.created_at, blog.created_at);

    let page = fixture.service.get_all_blogs(1, 10).await.unwrap();
    assert_eq!(page.data[0].author, "John Roe");

    let err = fixture
        .service
        .update_blog(
            &BlogId::new(Id::generate()),
            UpdateBlogCommandInput::default(),
            &requesting(&john),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref message) if message == BLOG_POST_NOT_FOUND));

    let err = fixture
        .service
        .update_blog(
            &blog.blog_id,
            UpdateBlogCommandInput::default(),
            &RequestingUser::new(UserId::new(Id::generate())),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref message) if message == USER_NOT_FOUND));
}

#[tokio::test]
async fn delete_blog_post() {
    let jane = user("Jane", "Doe");
    let john = user("John", "Roe");
    let fixture = fixture(vec![jane.clone(), john.clone()]);
    let blog = create(&fixture, &jane, "Hello").await;

    let err = fixture
        .service
        .delete_blog_post(&BlogId::new(Id::generate()))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::NotFound(ref message) if message == BLOG_POST_DOES_NOT_EXIST)
    );
    assert_eq!(err.status_code(), 404);

    fixture.service.delete_blog_post(&blog.blog_id).await.unwrap();
    assert!(
        fixture
            .service
            .get_single_blog(&blog.blog_id, &requesting(&john))
            .await
            .is_err()
    );
    assert_eq!(fixture.service.get_all_blogs(1, 10).await.unwrap().total, 0);
}

#[tokio::test]
async fn get_all_blogs_pagination() {
    let jane = user("Jane", "Doe");
    let fixture = fixture(vec![jane.clone()]);
    for i in 1..=25 {
        create(&fixture, &jane, &format!("blog {i}")).await;
    }

    let page = fixture.service.get_all_blogs(2, 10).await.unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(
        titles(&page.data),
        (11..=20).map(|i| format!("blog {i}")).collect::<Vec<_>>()
    );

    let page = fixture.service.get_all_blogs(3, 10).await.unwrap();
    assert_eq!(page.data.len(), 5);
    assert_eq!(page.total, 25);

    let page = fixture.service.get_all_blogs(4, 10).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 25);
}

#[tokio::test]
async fn missing_author_is_soft_in_bulk() {
    let jane = user("Jane", "Doe");
    let john = user("John", "Roe");
    let fixture = fixture(vec![jane.clone(), john.clone()]);
    let orphan = create(&fixture, &jane, "orphan").await;
    create(&fixture, &john, "kept").await;
    fixture.users.remove(&jane.id).await;

    let page = fixture.service.get_all_blogs(1, 10).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.data[0].author, UNKNOWN_AUTHOR);
    assert_eq!(page.data[1].author, "John Roe");
    assert_eq!(
        fixture.observer.events(),
        vec![format!("missing_author:{}", orphan.blog_id)]
    );

    let page = fixture
        .service
        .search_blogs(&BlogSearchQuery {
            title: Some("orphan".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.data[0].author, UNKNOWN_AUTHOR);
}

#[tokio::test]
async fn search_blank_filter() {
    let fixture = fixture(Vec::new());
    let err = fixture
        .service
        .search_blogs(&BlogSearchQuery {
            title: Some("   ".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("Title value is empty"));
    assert_eq!(err.status_code(), 400);

    let err = fixture
        .service
        .search_blogs(&BlogSearchQuery {
            created_date: Some("someday".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn search_author_matches_both_names() {
    let janssen = user("Jane", "Janssen");
    let smith = user("Jane", "Smith");
    let fixture = fixture(vec![janssen.clone(), smith.clone()]);
    create(&fixture, &janssen, "by janssen").await;
    create(&fixture, &smith, "by smith").await;

    let page = fixture
        .service
        .search_blogs(&BlogSearchQuery {
            author: Some("Jan".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(titles(&page.data), vec!["by janssen"]);
    assert_eq!(page.data[0].author, "Jane Janssen");
}

#[tokio::test]
async fn search_created_date_lower_bound() {
    let jane = user("Jane", "Doe");
    let fixture = fixture_with(
        vec![jane.clone()],
        vec![
            seeded_blog("before", "2023-12-31T23:59:59Z", &jane),
            seeded_blog("midnight", "2024-01-01T00:00:00Z", &jane),
            seeded_blog("later", "2024-02-01T12:00:00Z", &jane),
        ],
        SearchConfig::default(),
    );

    let page = fixture
        .service
        .search_blogs(&BlogSearchQuery {
            created_date: Some("2024-01-01".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(titles(&page.data), vec!["midnight", "later"]);
}

#[tokio::test]
async fn search_tags_as_one_string() {
    let jane = user("Jane", "Doe");
    let fixture = fixture(vec![jane.clone()]);
    let tags = vec!["a".to_string(), "b".to_string()];
    fixture
        .service
        .create_blog(
            CreateBlogCommandInput {
                title: "tagged",
                content: "content",
                tags: &tags,
                image_urls: &[],
            },
            &requesting(&jane),
        )
        .await
        .unwrap();
    create(&fixture, &jane, "untagged").await;

    let page = fixture
        .service
        .search_blogs(&BlogSearchQuery {
            tags: Some("a,b".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(titles(&page.data), vec!["tagged"]);

    let page = fixture
        .service
        .search_blogs(&BlogSearchQuery {
            tags: Some("b,a".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn search_combines_criteria() {
    let jane = user("Jane", "Doe");
    let fixture = fixture(vec![jane.clone()]);
    create(&fixture, &jane, "rust tips").await;
    create(&fixture, &jane, "go tips").await;
    create(&fixture, &jane, "rust news").await;

    let page = fixture
        .service
        .search_blogs(&BlogSearchQuery {
            title: Some("rust".into()),
            content: Some("cont".into()),
            page: Some(2),
            page_size: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(titles(&page.data), vec!["rust news"]);
}

#[tokio::test]
async fn search_without_results() {
    let jane = user("Jane", "Doe");
    let fixture = fixture(vec![jane.clone()]);
    create(&fixture, &jane, "Rust").await;

    let page = fixture
        .service
        .search_blogs(&BlogSearchQuery {
            title: Some("rust".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(fixture.observer.events(), vec!["empty_search"]);
}

#[tokio::test]
async fn search_case_insensitive() {
    let jane = user("Jane", "Doe");
    let fixture = fixture_with(
        vec![jane.clone()],
        Vec::new(),
        SearchConfig {
            case_insensitive: true,
            default_page_size: 10,
        },
    );
    create(&fixture, &jane, "Rust").await;

    let page = fixture
        .service
        .search_blogs(&BlogSearchQuery {
            title: Some("rUST".into()),
            author: Some("E".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn from_config() {
    let config =
        AppConfig::load_from(&Path::new(env!("CARGO_MANIFEST_DIR")).join("config")).unwrap();
    Tracer::install(&config).unwrap();

    let service = BlogService::from_config(&config).await.unwrap();
    let page = service.get_all_blogs(1, 10).await.unwrap();
    assert_eq!(page.total, 0);

    let err = service
        .create_blog(
            CreateBlogCommandInput {
                title: "Hello",
                content: "World",
                tags: &[],
                image_urls: &[],
            },
            &RequestingUser::new(UserId::new(Id::generate())),
        )
        .await
        .unwrap_err();
    assert!(err.is_client_error());
}
