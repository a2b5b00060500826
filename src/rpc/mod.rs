//! Typed procedure layer between RPC clients and the backend client.
//!
//! Procedures validate nothing beyond their typed input and delegate straight
//! to [`ApiClient`](shelf_catalog::ApiClient); backend failures are passed
//! through unchanged as [`RpcError::Service`](shelf_http::RpcError::Service).

use std::sync::Arc;

use shelf_authz::Session;
use shelf_catalog::ApiClientArc;
use shelf_http::RpcResult;

use crate::modules::{books::BookRouter, photos::PhotoRouter, system, tags::TagRouter};

/// Everything a procedure may use while serving one call.
#[derive(Debug, Clone)]
pub struct RpcContext {
    pub api_client: ApiClientArc,
    pub web_base_url: Arc<str>,
    pub session: Option<Session>,
}

impl RpcContext {
    /// Guard for protected procedures.
    pub fn require_session(&self) -> RpcResult<&Session> {
        Ok(shelf_authz::require_session(self.session.as_ref())?)
    }
}

/// Shared handler state; builds a per-call [`AppRouter`].
#[derive(Debug, Clone)]
pub struct RpcState {
    api_client: ApiClientArc,
    web_base_url: Arc<str>,
}

impl RpcState {
    pub fn new(api_client: ApiClientArc, web_base_url: impl Into<Arc<str>>) -> Self {
        Self {
            api_client,
            web_base_url: web_base_url.into(),
        }
    }

    pub fn context(&self, session: Option<Session>) -> RpcContext {
        RpcContext {
            api_client: self.api_client.clone(),
            web_base_url: self.web_base_url.clone(),
            session,
        }
    }

    /// Router bound to one caller's session.
    pub fn caller(&self, session: Option<Session>) -> AppRouter {
        AppRouter::new(self.context(session))
    }
}

/// Root of the procedure tree: `ping`, `webURL`, `book.*`, `tag.*`, `photo.*`.
#[derive(Debug, Clone)]
pub struct AppRouter {
    ctx: RpcContext,
}

impl AppRouter {
    pub fn new(ctx: RpcContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &RpcContext {
        &self.ctx
    }

    pub async fn ping(&self) -> RpcResult<String> {
        system::ping(&self.ctx).await
    }

    pub async fn web_url(&self) -> RpcResult<String> {
        system::web_url(&self.ctx).await
    }

    pub fn book(&self) -> BookRouter<'_> {
        BookRouter::new(&self.ctx)
    }

    pub fn tag(&self) -> TagRouter<'_> {
        TagRouter::new(&self.ctx)
    }

    pub fn photo(&self) -> PhotoRouter<'_> {
        PhotoRouter::new(&self.ctx)
    }
}
