//! Client-side batch runner used by the `echo-client` binary
//!
//! Fires every request concurrently over one connection and tallies whether
//! each reply carried the message that was sent.

use crate::activations::echo::{EchoRequest, EchoRpcClient};
use futures::future::join_all;

/// Tally of one batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub ok: usize,
    pub mismatched: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// True when every call came back with its own message
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.mismatched == 0
    }

    pub fn total(&self) -> usize {
        self.ok + self.mismatched + self.failed
    }
}

/// `count` identical requests carrying `message` and `delay_time`
pub fn batch_requests(message: &str, delay_time: i64, count: usize) -> Vec<EchoRequest> {
    (0..count)
        .map(|_| EchoRequest::new(message, delay_time))
        .collect()
}

pub async fn run_batch<C>(client: &C, requests: Vec<EchoRequest>) -> BatchSummary
where
    C: EchoRpcClient + Sync,
{
    let calls = requests.into_iter().map(|request| async move {
        let sent = request.message.clone();
        (sent, client.echo(request).await)
    });

    let mut summary = BatchSummary::default();
    for (sent, result) in join_all(calls).await {
        match result {
            Ok(reply) if reply.message == sent => summary.ok += 1,
            Ok(reply) => {
                tracing::warn!(sent_len = sent.len(), reply_len = reply.message.len(), "Reply differs from request");
                summary.mismatched += 1;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Echo call failed");
                summary.failed += 1;
            }
        }
    }
    summary
}
