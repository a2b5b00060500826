use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::outcome::{safe, ApiResult};
use crate::schema::{
    Book, BookForm, BookQuery, CreateTagInput, ListTagsInput, Photo, Schema, Tag, TagQuery,
};

/// HTTP client for the remote catalog service.
///
/// Issues exactly one request per operation. No retries and no timeout are
/// configured here; the transport default applies.
#[derive(Debug, Clone)]
pub struct LiveApiClient {
    http: Client,
    base_url: String,
    authorization: String,
}

impl LiveApiClient {
    /// Create a client for `base_url`, optionally carrying a bearer token.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("shelf/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let authorization = match token.filter(|t| !t.is_empty()) {
            Some(token) => format!("Bearer {token}"),
            None => "Bearer".to_string(),
        };

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            authorization,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> anyhow::Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "catalog service rejected request");
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            }
            .into());
        }
        Ok(response)
    }

    async fn fetch_json(&self, request: RequestBuilder) -> anyhow::Result<Value> {
        let response = self.send(request).await?;
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait::async_trait]
impl ApiClient for LiveApiClient {
    async fn list_books(&self) -> ApiResult<Vec<Book>> {
        safe(async {
            let raw = self.fetch_json(self.request(Method::GET, "/api/books")).await?;
            Ok::<_, anyhow::Error>(Book::parse_list(&raw)?)
        })
        .await
    }

    async fn find_one_book(&self, query: BookQuery) -> ApiResult<Book> {
        safe(async {
            let path = format!("/api/books/{}", query.book_id);
            let raw = self.fetch_json(self.request(Method::GET, &path)).await?;
            Ok::<_, anyhow::Error>(Book::parse(&raw)?)
        })
        .await
    }

    async fn create_book(&self, form: BookForm) -> ApiResult<()> {
        safe(async {
            self.send(self.request(Method::POST, "/api/books").json(&form))
                .await?;
            Ok::<_, anyhow::Error>(())
        })
        .await
    }

    async fn update_book(&self, query: BookQuery, form: BookForm) -> ApiResult<()> {
        safe(async {
            let path = format!("/api/books/{}", query.book_id);
            self.send(self.request(Method::PUT, &path).json(&form)).await?;
            Ok::<_, anyhow::Error>(())
        })
        .await
    }

    async fn delete_book(&self, query: BookQuery) -> ApiResult<()> {
        safe(async {
            let path = format!("/api/books/{}", query.book_id);
            self.send(self.request(Method::DELETE, &path)).await?;
            Ok::<_, anyhow::Error>(())
        })
        .await
    }

    async fn list_tags(&self, input: ListTagsInput) -> ApiResult<Vec<Tag>> {
        safe(async {
            let mut request = self.request(Method::GET, "/api/tags");
            if let Some(keyword) = input.keyword.as_deref().filter(|k| !k.is_empty()) {
                request = request.query(&[("keyword", keyword)]);
            }
            let raw = self.fetch_json(request).await?;
            Ok::<_, anyhow::Error>(Tag::parse_list(&raw)?)
        })
        .await
    }

    async fn create_tag(&self, input: CreateTagInput) -> ApiResult<()> {
        safe(async {
            self.send(self.request(Method::POST, "/api/tags").json(&input))
                .await?;
            Ok::<_, anyhow::Error>(())
        })
        .await
    }

    async fn delete_tag(&self, input: TagQuery) -> ApiResult<()> {
        safe(async {
            let path = format!("/api/tags/{}", input.id);
            self.send(self.request(Method::DELETE, &path)).await?;
            Ok::<_, anyhow::Error>(())
        })
        .await
    }

    async fn list_photos(&self) -> ApiResult<Vec<Photo>> {
        safe(async {
            let raw = self.fetch_json(self.request(Method::GET, "/api/photos")).await?;
            Ok::<_, anyhow::Error>(Photo::parse_list(&raw)?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = LiveApiClient::new("http://catalog.local/", None).unwrap();
        assert_eq!(client.base_url(), "http://catalog.local");
    }

    #[test]
    fn bearer_header_with_and_without_token() {
        let anonymous = LiveApiClient::new("http://catalog.local", None).unwrap();
        assert_eq!(anonymous.authorization, "Bearer");

        let blank = LiveApiClient::new("http://catalog.local", Some(String::new())).unwrap();
        assert_eq!(blank.authorization, "Bearer");

        let signed = LiveApiClient::new("http://catalog.local", Some("s3cret".into())).unwrap();
        assert_eq!(signed.authorization, "Bearer s3cret");
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        let client = LiveApiClient::new("http://127.0.0.1:9", None).unwrap();
        let result = client.list_books().await;
        assert!(matches!(result, Err(ApiError::Transport { .. })), "{result:?}");
    }
}
