use std::fmt::Debug;
use std::sync::Arc;

use crate::outcome::ApiResult;
use crate::schema::{
    Book, BookForm, BookQuery, CreateTagInput, ListTagsInput, Photo, Tag, TagQuery,
};

pub mod live;
pub mod memory;

/// Data-access contract against the catalog service.
///
/// Every operation resolves to an [`ApiResult`]; implementations never panic
/// on service failures.
#[async_trait::async_trait]
pub trait ApiClient: Debug + Send + Sync {
    async fn list_books(&self) -> ApiResult<Vec<Book>>;

    async fn find_one_book(&self, query: BookQuery) -> ApiResult<Book>;

    async fn create_book(&self, form: BookForm) -> ApiResult<()>;

    /// Replace every field of the book except its id.
    async fn update_book(&self, query: BookQuery, form: BookForm) -> ApiResult<()>;

    async fn delete_book(&self, query: BookQuery) -> ApiResult<()>;

    async fn list_tags(&self, input: ListTagsInput) -> ApiResult<Vec<Tag>>;

    async fn create_tag(&self, input: CreateTagInput) -> ApiResult<()>;

    async fn delete_tag(&self, input: TagQuery) -> ApiResult<()>;

    async fn list_photos(&self) -> ApiResult<Vec<Photo>>;
}

pub type ApiClientArc = Arc<dyn ApiClient>;
