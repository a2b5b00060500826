use shelf_authz::Session;
use shelf_catalog::schema::{
    Book, BookForm, BookQuery, CreateTagInput, ListTagsInput, Photo, Tag, TagQuery,
};
use shelf_http::RpcResult;

use crate::client::RpcClient;
use crate::modules::books::UpdateBookInput;
use crate::rpc::{AppRouter, RpcState};

/// Calls procedures directly, without HTTP.
#[derive(Debug, Clone)]
pub struct ServerRpcClient {
    router: AppRouter,
}

impl ServerRpcClient {
    pub fn new(state: &RpcState, session: Option<Session>) -> Self {
        Self {
            router: state.caller(session),
        }
    }
}

#[async_trait::async_trait]
impl RpcClient for ServerRpcClient {
    async fn ping(&self) -> RpcResult<String> {
        self.router.ping().await
    }

    async fn web_url(&self) -> RpcResult<String> {
        self.router.web_url().await
    }

    async fn book_list(&self) -> RpcResult<Vec<Book>> {
        self.router.book().list().await
    }

    async fn book_find_one(&self, input: BookQuery) -> RpcResult<Book> {
        self.router.book().find_one(input).await
    }

    async fn book_create(&self, input: BookForm) -> RpcResult<()> {
        self.router.book().manage().create(input).await
    }

    async fn book_update(&self, input: UpdateBookInput) -> RpcResult<()> {
        self.router.book().manage().update(input).await
    }

    async fn book_delete(&self, input: BookQuery) -> RpcResult<()> {
        self.router.book().manage().delete(input).await
    }

    async fn tag_list(&self, input: ListTagsInput) -> RpcResult<Vec<Tag>> {
        self.router.tag().list(input).await
    }

    async fn tag_get(&self, input: TagQuery) -> RpcResult<Tag> {
        self.router.tag().get(input).await
    }

    async fn tag_create(&self, input: CreateTagInput) -> RpcResult<()> {
        self.router.tag().manage().create(input).await
    }

    async fn tag_delete(&self, input: TagQuery) -> RpcResult<()> {
        self.router.tag().manage().delete(input).await
    }

    async fn photo_list(&self) -> RpcResult<Vec<Photo>> {
        self.router.photo().list().await
    }
}
