mod activation;
mod types;

pub use activation::{Health, HealthRpcClient, HealthRpcServer};
pub use types::HealthStatus;
