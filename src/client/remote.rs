use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use shelf_catalog::schema::{
    Book, BookForm, BookQuery, CreateTagInput, ListTagsInput, Photo, Schema, Tag, TagQuery,
};
use shelf_http::{error::ErrorResponse, router::RPC_PREFIX, Envelope, RpcError, RpcResult};

use crate::client::RpcClient;
use crate::modules::books::UpdateBookInput;

/// Calls procedures over HTTP against a running shelf server.
#[derive(Debug, Clone)]
pub struct RemoteRpcClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl RemoteRpcClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> RpcResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("shelf-rpc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RpcError::transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_url, RPC_PREFIX, path)
    }

    async fn query<O: Schema>(&self, path: &str) -> RpcResult<O> {
        self.call(path, self.http.get(self.url(path))).await
    }

    async fn query_with<I: Serialize, O: Schema>(&self, path: &str, input: &I) -> RpcResult<O> {
        let encoded = serde_json::to_string(input)
            .map_err(|e| RpcError::bad_request(vec![], e.to_string()))?;
        let request = self.http.get(self.url(path)).query(&[("input", encoded)]);
        self.call(path, request).await
    }

    async fn mutation<I: Serialize, O: Schema>(&self, path: &str, input: &I) -> RpcResult<O> {
        self.call(path, self.http.post(self.url(path)).json(input))
            .await
    }

    async fn call<O: Schema>(&self, path: &str, request: RequestBuilder) -> RpcResult<O> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(procedure = path, error = %e, "rpc server unreachable");
            RpcError::transport(e.to_string())
        })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RpcError::transport(e.to_string()))?;

        if !status.is_success() {
            return match serde_json::from_slice::<ErrorResponse>(&bytes) {
                Ok(body) => Err(body.error.into()),
                Err(_) => Err(RpcError::transport(format!(
                    "rpc server answered {status} for {path}"
                ))),
            };
        }

        let raw: Value = serde_json::from_slice(&bytes)
            .map_err(|e| RpcError::transport(format!("malformed response from {path}: {e}")))?;
        let value = Envelope::<Value>::parse(&raw)
            .map_err(|e| RpcError::transport(format!("malformed response from {path}: {e}")))?
            .into_result()?;

        O::parse(&value)
            .map_err(|e| RpcError::transport(format!("malformed response from {path}: {e}")))
    }
}

#[async_trait::async_trait]
impl RpcClient for RemoteRpcClient {
    async fn ping(&self) -> RpcResult<String> {
        self.query("ping").await
    }

    async fn web_url(&self) -> RpcResult<String> {
        self.query("webURL").await
    }

    async fn book_list(&self) -> RpcResult<Vec<Book>> {
        self.query("book/list").await
    }

    async fn book_find_one(&self, input: BookQuery) -> RpcResult<Book> {
        self.query_with("book/findOne", &input).await
    }

    async fn book_create(&self, input: BookForm) -> RpcResult<()> {
        self.mutation("book/manage/create", &input).await
    }

    async fn book_update(&self, input: UpdateBookInput) -> RpcResult<()> {
        self.mutation("book/manage/update", &input).await
    }

    async fn book_delete(&self, input: BookQuery) -> RpcResult<()> {
        self.mutation("book/manage/delete", &input).await
    }

    async fn tag_list(&self, input: ListTagsInput) -> RpcResult<Vec<Tag>> {
        self.query_with("tag/list", &input).await
    }

    async fn tag_get(&self, input: TagQuery) -> RpcResult<Tag> {
        self.query_with("tag/get", &input).await
    }

    async fn tag_create(&self, input: CreateTagInput) -> RpcResult<()> {
        self.mutation("tag/manage/create", &input).await
    }

    async fn tag_delete(&self, input: TagQuery) -> RpcResult<()> {
        self.mutation("tag/manage/delete", &input).await
    }

    async fn photo_list(&self) -> RpcResult<Vec<Photo>> {
        self.query("photo/list").await
    }
}
