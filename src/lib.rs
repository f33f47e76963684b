pub mod activations;
pub mod builder;
pub mod client;
pub mod config;
pub mod server;

// Re-export commonly used items
pub use activations::echo::{Echo, EchoReply, EchoRequest};
pub use builder::build_module;
pub use config::ServerConfig;
pub use server::{DrainOutcome, EchoServer, RunningServer, ServerState};
