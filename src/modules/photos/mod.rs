use async_trait::async_trait;
use axum::{extract::State, routing::get, Router};
use serde_json::json;
use shelf_catalog::schema::Photo;
use shelf_http::{
    openapi::{array_of, procedure, ProcedureKind},
    Envelope, MaybeSession, RpcResult,
};
use shelf_kernel::Module;

use crate::rpc::{RpcContext, RpcState};

/// `photo.*`: read-only legacy photo listing.
pub struct PhotoRouter<'a> {
    ctx: &'a RpcContext,
}

impl<'a> PhotoRouter<'a> {
    pub fn new(ctx: &'a RpcContext) -> Self {
        Self { ctx }
    }

    pub async fn list(&self) -> RpcResult<Vec<Photo>> {
        Ok(self.ctx.api_client.list_photos().await?)
    }
}

pub struct PhotosModule {
    state: RpcState,
}

impl PhotosModule {
    pub fn new(state: RpcState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for PhotosModule {
    fn name(&self) -> &'static str {
        "photo"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/list", get(list))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "/list": procedure(ProcedureKind::Query, "Photos", "List photos", None, array_of("Photo")),
        }))
    }
}

async fn list(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
) -> RpcResult<Envelope<Vec<Photo>>> {
    Ok(Envelope::Val(state.caller(session).photo().list().await?))
}

/// Create a new instance of the photo module
pub fn create_module(state: RpcState) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(PhotosModule::new(state))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shelf_catalog::InMemoryApiClient;

    use super::*;

    #[tokio::test]
    async fn lists_seeded_photos() {
        let state = RpcState::new(Arc::new(InMemoryApiClient::new()), "http://localhost");
        let photos = state.caller(None).photo().list().await.unwrap();
        assert_eq!(photos.len(), 5);
        assert!(photos.iter().all(|photo| photo.album_id == 1));
    }
}
