//! `book.*` procedures.

pub mod manage;

use async_trait::async_trait;
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde_json::json;
use shelf_catalog::schema::{Book, BookForm, BookQuery};
use shelf_http::{
    openapi::{array_of, procedure, schema_ref, ProcedureKind},
    Envelope, MaybeSession, RpcInput, RpcResult,
};
use shelf_kernel::{InitCtx, Module};

use crate::rpc::{RpcContext, RpcState};

pub use manage::{ManageBookRouter, UpdateBookInput};

/// Public book procedures.
pub struct BookRouter<'a> {
    ctx: &'a RpcContext,
}

impl<'a> BookRouter<'a> {
    pub fn new(ctx: &'a RpcContext) -> Self {
        Self { ctx }
    }

    pub async fn list(&self) -> RpcResult<Vec<Book>> {
        Ok(self.ctx.api_client.list_books().await?)
    }

    pub async fn find_one(&self, input: BookQuery) -> RpcResult<Book> {
        Ok(self.ctx.api_client.find_one_book(input).await?)
    }

    pub fn manage(&self) -> ManageBookRouter<'a> {
        ManageBookRouter::new(self.ctx)
    }
}

/// Book catalog module
pub struct BooksModule {
    state: RpcState,
}

impl BooksModule {
    pub fn new(state: RpcState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "book"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            backend = ?ctx.settings.service.backend,
            "book module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/list", get(list))
            .route("/findOne", get(find_one))
            .route("/manage/create", post(create))
            .route("/manage/update", post(update))
            .route("/manage/delete", post(delete))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let unit = json!({ "type": "null" });

        let mut update = procedure(
            ProcedureKind::Mutation,
            "Books",
            "Replace every field of a book except its id",
            None,
            unit.clone(),
        );
        update["post"]["requestBody"] = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": {
                        "type": "object",
                        "properties": {
                            "bookId": schema_ref("BookQuery"),
                            "data": schema_ref("BookForm")
                        },
                        "required": ["bookId", "data"]
                    }
                }
            }
        });

        Some(json!({
            "/list": procedure(ProcedureKind::Query, "Books", "List books", None, array_of("Book")),
            "/findOne": procedure(
                ProcedureKind::Query,
                "Books",
                "Find one book",
                Some("BookQuery"),
                schema_ref("Book"),
            ),
            "/manage/create": procedure(
                ProcedureKind::Mutation,
                "Books",
                "Create a book",
                Some("BookForm"),
                unit.clone(),
            ),
            "/manage/update": update,
            "/manage/delete": procedure(
                ProcedureKind::Mutation,
                "Books",
                "Delete an existing book",
                Some("BookQuery"),
                unit,
            ),
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book module stopped");
        Ok(())
    }
}

async fn list(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
) -> RpcResult<Envelope<Vec<Book>>> {
    Ok(Envelope::Val(state.caller(session).book().list().await?))
}

async fn find_one(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
    RpcInput(input): RpcInput<BookQuery>,
) -> RpcResult<Envelope<Book>> {
    Ok(Envelope::Val(
        state.caller(session).book().find_one(input).await?,
    ))
}

async fn create(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
    RpcInput(input): RpcInput<BookForm>,
) -> RpcResult<Envelope<()>> {
    state.caller(session).book().manage().create(input).await?;
    Ok(Envelope::Val(()))
}

async fn update(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
    RpcInput(input): RpcInput<UpdateBookInput>,
) -> RpcResult<Envelope<()>> {
    state.caller(session).book().manage().update(input).await?;
    Ok(Envelope::Val(()))
}

async fn delete(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
    RpcInput(input): RpcInput<BookQuery>,
) -> RpcResult<Envelope<()>> {
    state.caller(session).book().manage().delete(input).await?;
    Ok(Envelope::Val(()))
}

/// Create a new instance of the book module
pub fn create_module(state: RpcState) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(state))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shelf_catalog::{ApiError, InMemoryApiClient};

    use super::*;

    fn state() -> RpcState {
        RpcState::new(Arc::new(InMemoryApiClient::new()), "http://localhost:8080")
    }

    #[tokio::test]
    async fn lists_seeded_books() {
        let books = state().caller(None).book().list().await.unwrap();
        assert_eq!(books.len(), 5);
        assert_eq!(books[0].id, 1);
    }

    #[tokio::test]
    async fn find_one_returns_the_requested_book() {
        let book = state()
            .caller(None)
            .book()
            .find_one(BookQuery::new(3))
            .await
            .unwrap();
        assert_eq!(book.id, 3);
        assert_eq!(book.title, "A Brief History of Time");
    }

    #[tokio::test]
    async fn find_one_passes_backend_failure_through() {
        let err = state()
            .caller(None)
            .book()
            .find_one(BookQuery::new(99))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_service(),
            Some(&ApiError::BookNotFound { book_id: 99 })
        );
        assert!(err.to_string().contains("Book not found"));
    }

    #[test]
    fn openapi_lists_every_procedure() {
        let doc = BooksModule::new(state()).openapi().unwrap();
        for path in [
            "/list",
            "/findOne",
            "/manage/create",
            "/manage/update",
            "/manage/delete",
        ] {
            assert!(doc[path].is_object(), "missing {path}");
        }
        assert!(doc["/manage/update"]["post"]["requestBody"].is_object());
    }
}
