mod activation;
mod types;


pub use activation::{Echo, EchoRpcClient, EchoRpcServer};
pub use types::{EchoError, EchoReply, EchoRequest};
