//! `tag.*` procedures over the legacy tag endpoints.

pub mod manage;

use async_trait::async_trait;
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde_json::json;
use shelf_catalog::{
    schema::{CreateTagInput, ListTagsInput, Tag, TagQuery},
    ApiError,
};
use shelf_http::{
    openapi::{array_of, procedure, schema_ref, ProcedureKind},
    Envelope, MaybeSession, RpcInput, RpcResult,
};
use shelf_kernel::Module;

use crate::rpc::{RpcContext, RpcState};

pub use manage::ManageTagRouter;

pub struct TagRouter<'a> {
    ctx: &'a RpcContext,
}

impl<'a> TagRouter<'a> {
    pub fn new(ctx: &'a RpcContext) -> Self {
        Self { ctx }
    }

    pub async fn list(&self, input: ListTagsInput) -> RpcResult<Vec<Tag>> {
        Ok(self.ctx.api_client.list_tags(input).await?)
    }

    /// The tag service has no single-tag endpoint; resolve by listing.
    pub async fn get(&self, input: TagQuery) -> RpcResult<Tag> {
        let tags = self
            .ctx
            .api_client
            .list_tags(ListTagsInput::default())
            .await?;

        tags.into_iter()
            .find(|tag| tag.id == input.id)
            .ok_or_else(|| ApiError::TagNotFound { id: input.id }.into())
    }

    /// Protected mutations; each requires a session.
    pub fn manage(&self) -> ManageTagRouter<'a> {
        ManageTagRouter::new(self.ctx)
    }
}

pub struct TagsModule {
    state: RpcState,
}

impl TagsModule {
    pub fn new(state: RpcState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for TagsModule {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/list", get(list))
            .route("/get", get(get_one))
            .route("/manage/create", post(create))
            .route("/manage/delete", post(delete))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let unit = json!({ "type": "null" });
        Some(json!({
            "/list": procedure(
                ProcedureKind::Query,
                "Tags",
                "List tags, optionally filtered by keyword",
                Some("ListTagsInput"),
                array_of("Tag"),
            ),
            "/get": procedure(ProcedureKind::Query, "Tags", "Get one tag", Some("TagQuery"), schema_ref("Tag")),
            "/manage/create": procedure(
                ProcedureKind::Mutation,
                "Tags",
                "Create a tag (session required)",
                Some("CreateTagInput"),
                unit.clone(),
            ),
            "/manage/delete": procedure(
                ProcedureKind::Mutation,
                "Tags",
                "Delete a tag (session required)",
                Some("TagQuery"),
                unit,
            ),
        }))
    }
}

async fn list(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
    RpcInput(input): RpcInput<ListTagsInput>,
) -> RpcResult<Envelope<Vec<Tag>>> {
    Ok(Envelope::Val(state.caller(session).tag().list(input).await?))
}

async fn get_one(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
    RpcInput(input): RpcInput<TagQuery>,
) -> RpcResult<Envelope<Tag>> {
    Ok(Envelope::Val(state.caller(session).tag().get(input).await?))
}

async fn create(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
    RpcInput(input): RpcInput<CreateTagInput>,
) -> RpcResult<Envelope<()>> {
    state.caller(session).tag().manage().create(input).await?;
    Ok(Envelope::Val(()))
}

async fn delete(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
    RpcInput(input): RpcInput<TagQuery>,
) -> RpcResult<Envelope<()>> {
    state.caller(session).tag().manage().delete(input).await?;
    Ok(Envelope::Val(()))
}

/// Create a new instance of the tag module
pub fn create_module(state: RpcState) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(TagsModule::new(state))
}
