//! `book.manage.*` mutations.

use serde::{Deserialize, Serialize};
use shelf_catalog::schema::{BookForm, BookQuery};
use shelf_http::RpcResult;

use crate::rpc::RpcContext;

/// Input of `book.manage.update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookInput {
    pub book_id: BookQuery,
    pub data: BookForm,
}

pub struct ManageBookRouter<'a> {
    ctx: &'a RpcContext,
}

impl<'a> ManageBookRouter<'a> {
    pub fn new(ctx: &'a RpcContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, input: BookForm) -> RpcResult<()> {
        Ok(self.ctx.api_client.create_book(input).await?)
    }

    pub async fn update(&self, input: UpdateBookInput) -> RpcResult<()> {
        Ok(self
            .ctx
            .api_client
            .update_book(input.book_id, input.data)
            .await?)
    }

    /// Delete a book that must already exist; a failed lookup is returned
    /// as-is and no delete is issued.
    pub async fn delete(&self, input: BookQuery) -> RpcResult<()> {
        if let Err(error) = self.ctx.api_client.find_one_book(input).await {
            tracing::info!(book_id = input.book_id, %error, "refusing to delete unresolved book");
            return Err(error.into());
        }

        Ok(self.ctx.api_client.delete_book(input).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use shelf_catalog::{
        schema::{Author, Book, CreateTagInput, ListTagsInput, Photo, Tag, TagQuery},
        ApiClient, ApiError, ApiResult, InMemoryApiClient,
    };

    use super::*;
    use crate::rpc::RpcState;

    fn form(title: &str) -> BookForm {
        BookForm {
            title: title.to_string(),
            thumbnail_url: "https://example.com/cover.png".to_string(),
            number_page: 320,
            detail: "A test book".to_string(),
            category: vec!["test".to_string()],
            author: Author {
                name: "Ada".to_string(),
                age: 36,
                retired: false,
            },
        }
    }

    /// Delegates to the in-memory client and counts delete calls.
    #[derive(Debug, Default)]
    struct CountingClient {
        inner: InMemoryApiClient,
        deletes: AtomicUsize,
    }

    #[async_trait]
    impl ApiClient for CountingClient {
        async fn list_books(&self) -> ApiResult<Vec<Book>> {
            self.inner.list_books().await
        }

        async fn find_one_book(&self, query: BookQuery) -> ApiResult<Book> {
            self.inner.find_one_book(query).await
        }

        async fn create_book(&self, form: BookForm) -> ApiResult<()> {
            self.inner.create_book(form).await
        }

        async fn update_book(&self, query: BookQuery, form: BookForm) -> ApiResult<()> {
            self.inner.update_book(query, form).await
        }

        async fn delete_book(&self, query: BookQuery) -> ApiResult<()> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete_book(query).await
        }

        async fn list_tags(&self, input: ListTagsInput) -> ApiResult<Vec<Tag>> {
            self.inner.list_tags(input).await
        }

        async fn create_tag(&self, input: CreateTagInput) -> ApiResult<()> {
            self.inner.create_tag(input).await
        }

        async fn delete_tag(&self, input: TagQuery) -> ApiResult<()> {
            self.inner.delete_tag(input).await
        }

        async fn list_photos(&self) -> ApiResult<Vec<Photo>> {
            self.inner.list_photos().await
        }
    }

    #[tokio::test]
    async fn create_assigns_a_fresh_id() {
        let client = Arc::new(InMemoryApiClient::new());
        let router = RpcState::new(client.clone(), "http://localhost").caller(None);

        router.book().manage().create(form("Fresh")).await.unwrap();

        let books = client.books().await;
        let created = books.iter().find(|b| b.title == "Fresh").unwrap();
        assert!(books.iter().filter(|b| b.id == created.id).count() == 1);
        assert!(created.id > 5);
    }

    #[tokio::test]
    async fn update_replaces_every_field_but_id() {
        let client = Arc::new(InMemoryApiClient::new());
        let router = RpcState::new(client.clone(), "http://localhost").caller(None);

        router
            .book()
            .manage()
            .update(UpdateBookInput {
                book_id: BookQuery::new(2),
                data: form("Rewritten"),
            })
            .await
            .unwrap();

        let book = router.book().find_one(BookQuery::new(2)).await.unwrap();
        assert_eq!(book, form("Rewritten").into_book(2));
    }

    #[tokio::test]
    async fn delete_existing_book() {
        let router = RpcState::new(Arc::new(InMemoryApiClient::new()), "http://localhost")
            .caller(None);

        router.book().manage().delete(BookQuery::new(1)).await.unwrap();

        let err = router.book().find_one(BookQuery::new(1)).await.unwrap_err();
        assert_eq!(err.as_service(), Some(&ApiError::BookNotFound { book_id: 1 }));
    }

    #[tokio::test]
    async fn delete_missing_book_never_issues_delete() {
        let client = Arc::new(CountingClient::default());
        let router = RpcState::new(client.clone(), "http://localhost").caller(None);

        let err = router
            .book()
            .manage()
            .delete(BookQuery::new(42))
            .await
            .unwrap_err();

        assert_eq!(err.as_service(), Some(&ApiError::BookNotFound { book_id: 42 }));
        assert_eq!(client.deletes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn update_input_uses_wire_names() {
        let input: UpdateBookInput = serde_json::from_value(serde_json::json!({
            "bookId": { "bookId": 7 },
            "data": serde_json::to_value(form("Wire")).unwrap()
        }))
        .unwrap();
        assert_eq!(input.book_id, BookQuery::new(7));
        assert_eq!(input.data.title, "Wire");
    }
}
