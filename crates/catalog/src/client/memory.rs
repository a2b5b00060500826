use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::fixtures;
use crate::outcome::{err, ok, ApiResult};
use crate::schema::{
    Book, BookForm, BookId, BookQuery, CreateTagInput, ListTagsInput, Photo, Tag, TagId,
    TagQuery,
};

/// In-memory stand-in for the catalog service.
///
/// Each instance owns its own store; build one per test rather than sharing.
/// Clones share the store.
#[derive(Debug, Clone)]
pub struct InMemoryApiClient {
    store: Arc<RwLock<Store>>,
    seed: Arc<Store>,
}

#[derive(Debug, Clone, Default)]
struct Store {
    books: Vec<Book>,
    tags: Vec<Tag>,
    photos: Vec<Photo>,
    latest_book_id: BookId,
    latest_tag_id: TagId,
}

impl Store {
    fn seeded(books: Vec<Book>, tags: Vec<Tag>, photos: Vec<Photo>) -> Self {
        let latest_book_id = books.iter().map(|b| b.id).max().unwrap_or_default();
        let latest_tag_id = tags.iter().map(|t| t.id).max().unwrap_or_default();
        Self {
            books,
            tags,
            photos,
            latest_book_id,
            latest_tag_id,
        }
    }
}

impl Default for InMemoryApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryApiClient {
    /// Store seeded with the bundled fixtures (books 1-5, tags 1-4, photos 1-5).
    pub fn new() -> Self {
        Self::with_data(fixtures::books(), fixtures::tags(), fixtures::photos())
    }

    /// Store with no records.
    pub fn empty() -> Self {
        Self::with_data(Vec::new(), Vec::new(), Vec::new())
    }

    /// Store seeded with the given records; id counters start above the
    /// highest seeded id.
    pub fn with_data(books: Vec<Book>, tags: Vec<Tag>, photos: Vec<Photo>) -> Self {
        let seed = Store::seeded(books, tags, photos);
        Self {
            store: Arc::new(RwLock::new(seed.clone())),
            seed: Arc::new(seed),
        }
    }

    /// Restore the records and counters this instance was built with.
    pub async fn reset(&self) {
        let mut store = self.store.write().await;
        *store = (*self.seed).clone();
        tracing::debug!("in-memory catalog reset");
    }

    pub async fn books(&self) -> Vec<Book> {
        self.store.read().await.books.clone()
    }

    pub async fn tags(&self) -> Vec<Tag> {
        self.store.read().await.tags.clone()
    }
}

#[async_trait::async_trait]
impl ApiClient for InMemoryApiClient {
    async fn list_books(&self) -> ApiResult<Vec<Book>> {
        ok(self.store.read().await.books.clone())
    }

    async fn find_one_book(&self, query: BookQuery) -> ApiResult<Book> {
        let store = self.store.read().await;
        match store.books.iter().find(|b| b.id == query.book_id) {
            Some(book) => ok(book.clone()),
            None => err(ApiError::BookNotFound {
                book_id: query.book_id,
            }),
        }
    }

    async fn create_book(&self, form: BookForm) -> ApiResult<()> {
        let mut store = self.store.write().await;
        store.latest_book_id += 1;
        let id = store.latest_book_id;
        store.books.push(form.into_book(id));
        tracing::debug!(book_id = id, "book created");
        ok(())
    }

    async fn update_book(&self, query: BookQuery, form: BookForm) -> ApiResult<()> {
        let mut store = self.store.write().await;
        match store.books.iter_mut().find(|b| b.id == query.book_id) {
            Some(book) => {
                *book = form.into_book(query.book_id);
                ok(())
            }
            None => err(ApiError::BookNotFound {
                book_id: query.book_id,
            }),
        }
    }

    async fn delete_book(&self, query: BookQuery) -> ApiResult<()> {
        let mut store = self.store.write().await;
        match store.books.iter().position(|b| b.id == query.book_id) {
            Some(index) => {
                store.books.remove(index);
                ok(())
            }
            None => err(ApiError::BookNotFound {
                book_id: query.book_id,
            }),
        }
    }

    async fn list_tags(&self, input: ListTagsInput) -> ApiResult<Vec<Tag>> {
        let store = self.store.read().await;
        let tags = match input.keyword.as_deref().filter(|k| !k.is_empty()) {
            Some(keyword) => {
                let keyword = keyword.to_lowercase();
                store
                    .tags
                    .iter()
                    .filter(|tag| tag.name.to_lowercase().contains(&keyword))
                    .cloned()
                    .collect()
            }
            None => store.tags.clone(),
        };
        ok(tags)
    }

    async fn create_tag(&self, input: CreateTagInput) -> ApiResult<()> {
        let mut store = self.store.write().await;
        store.latest_tag_id += 1;
        let id = store.latest_tag_id;
        store.tags.push(Tag {
            id,
            name: input.name,
        });
        ok(())
    }

    async fn delete_tag(&self, input: TagQuery) -> ApiResult<()> {
        let mut store = self.store.write().await;
        match store.tags.iter().position(|t| t.id == input.id) {
            Some(index) => {
                store.tags.remove(index);
                ok(())
            }
            None => err(ApiError::TagNotFound { id: input.id }),
        }
    }

    async fn list_photos(&self) -> ApiResult<Vec<Photo>> {
        ok(self.store.read().await.photos.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Author;

    fn form(title: &str) -> BookForm {
        BookForm {
            title: title.to_string(),
            thumbnail_url: "https://covers.example.com/new.jpg".to_string(),
            number_page: 120,
            detail: "fresh".to_string(),
            category: vec!["new".to_string(), "new".to_string()],
            author: Author {
                name: "Ann Writer".to_string(),
                age: 41,
                retired: false,
            },
        }
    }

    #[tokio::test]
    async fn finds_seeded_book_and_reports_missing_one() {
        let client = InMemoryApiClient::new();

        let book = client.find_one_book(BookQuery::new(3)).await.unwrap();
        assert_eq!(book.id, 3);

        let missing = client.find_one_book(BookQuery::new(99)).await.unwrap_err();
        assert!(missing.to_string().contains("Book not found"), "{missing}");
        assert!(missing.to_string().contains("99"));
    }

    #[tokio::test]
    async fn create_assigns_fresh_id() {
        let client = InMemoryApiClient::new();
        let before: Vec<BookId> = client.books().await.iter().map(|b| b.id).collect();

        client.create_book(form("New Arrival")).await.unwrap();

        let books = client.list_books().await.unwrap();
        let created = books.iter().find(|b| b.title == "New Arrival").unwrap();
        assert!(!before.contains(&created.id));
        assert_eq!(created.clone().into_parts().1, form("New Arrival"));
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() {
        let client = InMemoryApiClient::new();
        client.delete_book(BookQuery::new(5)).await.unwrap();
        client.create_book(form("Replacement")).await.unwrap();

        let books = client.list_books().await.unwrap();
        assert_eq!(books.last().unwrap().id, 6);
    }

    #[tokio::test]
    async fn update_replaces_everything_but_id() {
        let client = InMemoryApiClient::new();
        client
            .update_book(BookQuery::new(2), form("Dune Messiah"))
            .await
            .unwrap();

        let book = client.find_one_book(BookQuery::new(2)).await.unwrap();
        assert_eq!(book, form("Dune Messiah").into_book(2));
    }

    #[tokio::test]
    async fn delete_then_find_names_the_id() {
        let client = InMemoryApiClient::new();
        client.delete_book(BookQuery::new(4)).await.unwrap();

        let result = client.find_one_book(BookQuery::new(4)).await;
        assert_eq!(result, Err(ApiError::BookNotFound { book_id: 4 }));
    }

    #[tokio::test]
    async fn missing_ids_fail_without_panicking() {
        let client = InMemoryApiClient::new();
        let query = BookQuery::new(404);

        assert!(client.find_one_book(query).await.is_err());
        assert!(client.update_book(query, form("x")).await.is_err());
        assert!(client.delete_book(query).await.is_err());
        assert_eq!(client.books().await.len(), 5);
    }

    #[tokio::test]
    async fn tags_keep_insertion_order_and_filter_by_keyword() {
        let client = InMemoryApiClient::new();

        let names: Vec<String> = client
            .list_tags(ListTagsInput::default())
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["History", "Science", "Gaming", "Phones"]);

        let filtered = client
            .list_tags(ListTagsInput {
                keyword: Some("sci".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(filtered, vec![Tag { id: 2, name: "Science".to_string() }]);
    }

    #[tokio::test]
    async fn created_tag_gets_fresh_id() {
        let client = InMemoryApiClient::new();
        client
            .create_tag(CreateTagInput {
                name: "X".to_string(),
            })
            .await
            .unwrap();

        let tags = client.list_tags(ListTagsInput::default()).await.unwrap();
        let created = tags.iter().find(|t| t.name == "X").unwrap();
        assert_eq!(created.id, 5);
        assert_eq!(tags.iter().filter(|t| t.id == created.id).count(), 1);
    }

    #[tokio::test]
    async fn deleting_unknown_tag_names_the_id() {
        let client = InMemoryApiClient::new();
        let result = client.delete_tag(TagQuery { id: 42 }).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Specified tag not found with id: 42"
        );
    }

    #[tokio::test]
    async fn reset_restores_seed_and_counters() {
        let client = InMemoryApiClient::new();
        client.delete_book(BookQuery::new(1)).await.unwrap();
        client.create_book(form("Temp")).await.unwrap();

        client.reset().await;

        assert_eq!(client.books().await, fixtures::books());
        client.create_book(form("After reset")).await.unwrap();
        assert_eq!(client.books().await.last().unwrap().id, 6);
    }

    #[tokio::test]
    async fn instances_do_not_share_state() {
        let first = InMemoryApiClient::new();
        let second = InMemoryApiClient::new();
        first.delete_book(BookQuery::new(1)).await.unwrap();

        assert_eq!(first.books().await.len(), 4);
        assert_eq!(second.books().await.len(), 5);
    }

    #[tokio::test]
    async fn photos_are_listed() {
        let client = InMemoryApiClient::new();
        assert_eq!(client.list_photos().await.unwrap().len(), 5);
        assert!(InMemoryApiClient::empty().list_photos().await.unwrap().is_empty());
    }
}
