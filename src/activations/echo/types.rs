//! Echo request and reply types
//!
//! Field names follow the wire schema: the delay travels as `delayTime`.

use jsonrpsee::types::{error::INVALID_PARAMS_CODE, ErrorObjectOwned};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single echo call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoRequest {
    /// The message to send back
    #[serde(default)]
    pub message: String,
    /// How long the server waits before replying, in milliseconds
    #[serde(rename = "delayTime", default)]
    pub delay_time: i64,
}

impl EchoRequest {
    pub fn new(message: impl Into<String>, delay_time: i64) -> Self {
        Self {
            message: message.into(),
            delay_time,
        }
    }

    /// The requested delay as a duration; negative values are rejected
    pub fn delay(&self) -> Result<Duration, EchoError> {
        u64::try_from(self.delay_time)
            .map(Duration::from_millis)
            .map_err(|_| EchoError::NegativeDelay(self.delay_time))
    }
}

/// The reply to an echo call, always carrying the request message verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoReply {
    pub message: String,
}

impl From<EchoRequest> for EchoReply {
    fn from(request: EchoRequest) -> Self {
        Self {
            message: request.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EchoError {
    #[error("delayTime must be non-negative, got {0}")]
    NegativeDelay(i64),
}

impl From<EchoError> for ErrorObjectOwned {
    fn from(err: EchoError) -> Self {
        ErrorObjectOwned::owned(INVALID_PARAMS_CODE, err.to_string(), None::<()>)
    }
}
