//! shelf application library: the procedure tree, its HTTP modules and the
//! RPC clients that call it.

use std::sync::Arc;

use anyhow::Context;
use shelf_catalog::{ApiClientArc, InMemoryApiClient, LiveApiClient};
use shelf_kernel::{
    settings::{Backend, ServiceSettings, Settings},
    InitCtx, ModuleRegistry,
};

pub mod client;
pub mod modules;
pub mod rpc;

pub use client::{remote::RemoteRpcClient, server::ServerRpcClient, RpcClient, RpcClientArc};
pub use rpc::{AppRouter, RpcContext, RpcState};

/// Build the backend client selected by `service.backend`
pub fn api_client(settings: &ServiceSettings) -> anyhow::Result<ApiClientArc> {
    match settings.backend {
        Backend::Live => {
            let client = LiveApiClient::new(&settings.base_url, settings.token.clone())
                .context("failed to build catalog service client")?;
            Ok(Arc::new(client))
        }
        Backend::Memory => {
            tracing::warn!("serving catalog operations from the in-memory store");
            Ok(Arc::new(InMemoryApiClient::new()))
        }
    }
}

/// Shared procedure state derived from settings
pub fn rpc_state(settings: &Settings) -> anyhow::Result<RpcState> {
    Ok(RpcState::new(
        api_client(&settings.service)?,
        settings.web.base_url.as_str(),
    ))
}

/// Registry with every procedure module registered
pub fn build_registry(state: &RpcState) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, state);
    registry
}

/// Run the RPC server until shutdown
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let state = rpc_state(&settings)?;
    let registry = build_registry(&state);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = shelf_http::start_server(&registry, &settings).await;

    registry.stop_all().await?;
    served
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_every_module() {
        let state = RpcState::new(Arc::new(InMemoryApiClient::new()), "http://localhost");
        let registry = build_registry(&state);

        let names: Vec<_> = registry.modules().map(|m| m.name()).collect();
        assert_eq!(names, ["system", "book", "tag", "photo"]);
        assert_eq!(registry.get_module("system").unwrap().namespace(), "");
    }

    #[test]
    fn memory_backend_needs_no_service() {
        let settings = ServiceSettings {
            backend: Backend::Memory,
            ..ServiceSettings::default()
        };
        assert!(api_client(&settings).is_ok());
    }
}
