use async_trait::async_trait;
use axum::Router;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Core module trait that all shelf modules must implement
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// RPC namespace the module's procedures live under, e.g. `book` for
    /// `book.list`. An empty namespace mounts procedures at the RPC root.
    fn namespace(&self) -> &'static str {
        self.name()
    }

    /// Initialize the module with the provided context
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's procedures
    /// Routes will be mounted under `/trpc/{namespace}`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Return OpenAPI `paths` fragment for this module as JSON, keyed by
    /// route relative to the module mount point
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Called once the module is initialized and before traffic is served
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources
    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
