//! RPC module builder - composes every activation into one module
//!
//! This module is used by both the server binary and the integration tests.

use jsonrpsee::core::RegisterMethodError;
use jsonrpsee::RpcModule;

use crate::activations::echo::{Echo, EchoRpcServer};
use crate::activations::health::{Health, HealthRpcServer};

/// Build the RPC module with registered activations
///
/// - Echo: reply with the request message after `delayTime` milliseconds
/// - health_check: liveness and uptime
pub fn build_module() -> Result<RpcModule<()>, RegisterMethodError> {
    let mut module = RpcModule::new(());
    module.merge(Echo::new().into_rpc())?;
    module.merge(Health::new().into_rpc())?;
    Ok(module)
}
