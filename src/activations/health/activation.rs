use super::types::HealthStatus;
use async_trait::async_trait;
use jsonrpsee::core::RpcResult;
use jsonrpsee::proc_macros::rpc;
use std::time::Instant;

/// Health RPC interface
#[rpc(server, client, namespace = "health")]
pub trait HealthRpc {
    /// Check health status
    #[method(name = "check")]
    async fn check(&self) -> RpcResult<HealthStatus>;
}

/// Health activation - reports liveness and uptime for process supervisors
#[derive(Debug, Clone)]
pub struct Health {
    start_time: Instant,
}

impl Health {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn status(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthRpcServer for Health {
    async fn check(&self) -> RpcResult<HealthStatus> {
        Ok(self.status())
    }
}
