//! Callers of the procedure tree.
//!
//! [`ServerRpcClient`](server::ServerRpcClient) invokes procedures in
//! process; [`RemoteRpcClient`](remote::RemoteRpcClient) goes over HTTP.
//! Both resolve to identical results for identical calls.

use std::fmt::Debug;
use std::sync::Arc;

use shelf_catalog::schema::{
    Book, BookForm, BookQuery, CreateTagInput, ListTagsInput, Photo, Tag, TagQuery,
};
use shelf_http::RpcResult;

use crate::modules::books::UpdateBookInput;

pub mod remote;
pub mod server;

#[async_trait::async_trait]
pub trait RpcClient: Debug + Send + Sync {
    async fn ping(&self) -> RpcResult<String>;

    async fn web_url(&self) -> RpcResult<String>;

    async fn book_list(&self) -> RpcResult<Vec<Book>>;

    async fn book_find_one(&self, input: BookQuery) -> RpcResult<Book>;

    async fn book_create(&self, input: BookForm) -> RpcResult<()>;

    async fn book_update(&self, input: UpdateBookInput) -> RpcResult<()>;

    async fn book_delete(&self, input: BookQuery) -> RpcResult<()>;

    async fn tag_list(&self, input: ListTagsInput) -> RpcResult<Vec<Tag>>;

    async fn tag_get(&self, input: TagQuery) -> RpcResult<Tag>;

    async fn tag_create(&self, input: CreateTagInput) -> RpcResult<()>;

    async fn tag_delete(&self, input: TagQuery) -> RpcResult<()>;

    async fn photo_list(&self) -> RpcResult<Vec<Photo>>;
}

pub type RpcClientArc = Arc<dyn RpcClient>;
