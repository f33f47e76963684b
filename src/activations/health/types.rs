use serde::{Deserialize, Serialize};

/// Liveness report returned by `health_check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_seconds: u64,
    /// Unix timestamp (seconds) at which the report was produced
    pub timestamp: i64,
}
