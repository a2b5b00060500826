use async_trait::async_trait;
use axum::{extract::State, routing::get, Router};
use serde_json::json;
use shelf_http::{
    openapi::{procedure, ProcedureKind},
    Envelope, MaybeSession, RpcResult,
};
use shelf_kernel::Module;

use crate::rpc::{RpcContext, RpcState};

pub async fn ping(_ctx: &RpcContext) -> RpcResult<String> {
    Ok("pong".to_string())
}

pub async fn web_url(ctx: &RpcContext) -> RpcResult<String> {
    Ok(ctx.web_base_url.to_string())
}

/// Root-level procedures: `ping` and `webURL`
pub struct SystemModule {
    state: RpcState,
}

impl SystemModule {
    pub fn new(state: RpcState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for SystemModule {
    fn name(&self) -> &'static str {
        "system"
    }

    fn namespace(&self) -> &'static str {
        ""
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/ping", get(ping_handler))
            .route("/webURL", get(web_url_handler))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let string = json!({ "type": "string" });
        Some(json!({
            "/ping": procedure(ProcedureKind::Query, "System", "Liveness probe", None, string.clone()),
            "/webURL": procedure(ProcedureKind::Query, "System", "Public base URL of the app", None, string),
        }))
    }
}

async fn ping_handler(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
) -> RpcResult<Envelope<String>> {
    Ok(Envelope::Val(state.caller(session).ping().await?))
}

async fn web_url_handler(
    State(state): State<RpcState>,
    MaybeSession(session): MaybeSession,
) -> RpcResult<Envelope<String>> {
    Ok(Envelope::Val(state.caller(session).web_url().await?))
}

/// Create a new instance of the system module
pub fn create_module(state: RpcState) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(SystemModule::new(state))
}
