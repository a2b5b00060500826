pub mod books;
pub mod photos;
pub mod system;
pub mod tags;

use shelf_kernel::ModuleRegistry;

use crate::rpc::RpcState;

/// Register all procedure modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, state: &RpcState) {
    registry.register(system::create_module(state.clone()));
    registry.register(books::create_module(state.clone()));
    registry.register(tags::create_module(state.clone()));
    registry.register(photos::create_module(state.clone()));
}
