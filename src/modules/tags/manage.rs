use shelf_catalog::schema::{CreateTagInput, TagQuery};
use shelf_http::RpcResult;

use crate::rpc::RpcContext;

/// `tag.manage.*`: protected procedures.
pub struct ManageTagRouter<'a> {
    ctx: &'a RpcContext,
}

impl<'a> ManageTagRouter<'a> {
    pub fn new(ctx: &'a RpcContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, input: CreateTagInput) -> RpcResult<()> {
        self.ctx.require_session()?;
        Ok(self.ctx.api_client.create_tag(input).await?)
    }

    pub async fn delete(&self, input: TagQuery) -> RpcResult<()> {
        self.ctx.require_session()?;
        Ok(self.ctx.api_client.delete_tag(input).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shelf_authz::Session;
    use shelf_catalog::{schema::ListTagsInput, ApiError, InMemoryApiClient};
    use shelf_http::RpcError;

    use super::*;
    use crate::rpc::RpcState;

    fn session() -> Option<Session> {
        Session::from_authorization("Bearer secret")
    }

    #[tokio::test]
    async fn create_requires_a_session() {
        let client = Arc::new(InMemoryApiClient::new());
        let router = RpcState::new(client.clone(), "http://localhost").caller(None);

        let err = router
            .tag()
            .manage()
            .create(CreateTagInput { name: "X".to_string() })
            .await
            .unwrap_err();

        assert!(matches!(err, RpcError::Unauthorized { .. }));
        assert_eq!(client.tags().await.len(), 4);
    }

    #[tokio::test]
    async fn create_with_session_adds_a_fresh_tag() {
        let router = RpcState::new(Arc::new(InMemoryApiClient::new()), "http://localhost")
            .caller(session());

        router
            .tag()
            .manage()
            .create(CreateTagInput { name: "X".to_string() })
            .await
            .unwrap();

        let tags = router.tag().list(ListTagsInput::default()).await.unwrap();
        let created = tags.iter().find(|tag| tag.name == "X").unwrap();
        assert!(created.id > 4);
    }

    #[tokio::test]
    async fn delete_requires_a_session() {
        let router = RpcState::new(Arc::new(InMemoryApiClient::new()), "http://localhost")
            .caller(None);
        let err = router.tag().manage().delete(TagQuery { id: 1 }).await.unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn delete_missing_tag_passes_through() {
        let router = RpcState::new(Arc::new(InMemoryApiClient::new()), "http://localhost")
            .caller(session());
        let err = router.tag().manage().delete(TagQuery { id: 9 }).await.unwrap_err();
        assert_eq!(err.as_service(), Some(&ApiError::TagNotFound { id: 9 }));
    }
}
