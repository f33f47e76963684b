//! Echo activation - replies with the request message after a requested delay
//!
//! Each call sleeps on its own future, so a long delay never holds up other
//! calls or the accept loop. When the transport drops a call (client gone,
//! drain deadline passed) the sleep is abandoned and no reply is produced.

use super::types::{EchoError, EchoReply, EchoRequest};
use async_trait::async_trait;
use jsonrpsee::core::RpcResult;
use jsonrpsee::proc_macros::rpc;

/// Echo RPC interface
#[rpc(server, client)]
pub trait EchoRpc {
    /// Wait `delayTime` milliseconds, then return the message unchanged
    #[method(name = "Echo")]
    async fn echo(&self, request: EchoRequest) -> RpcResult<EchoReply>;
}

/// Echo activation - stateless, safe to share across every connection
#[derive(Debug, Clone, Copy, Default)]
pub struct Echo;

impl Echo {
    /// Name the echo method is registered under
    pub const METHOD: &'static str = "Echo";

    pub fn new() -> Self {
        Echo
    }

    /// Transport-independent body of the `Echo` call
    pub async fn reply(&self, request: EchoRequest) -> Result<EchoReply, EchoError> {
        let delay = request.delay()?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(EchoReply::from(request))
    }
}

#[async_trait]
impl EchoRpcServer for Echo {
    async fn echo(&self, request: EchoRequest) -> RpcResult<EchoReply> {
        Ok(self.reply(request).await?)
    }
}
