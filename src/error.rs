use std::time::Duration;

use crate::transfer::TransferStep;

#[derive(Debug, thiserror::Error)]
pub enum MqueueError {
    #[error("Invalid direction {0:?}, expected one of LTR, RTL, LTL, RTR")]
    InvalidDirection(String),
    #[error("Missing required option: {0}")]
    MissingOption(&'static str),
    #[error("Source queue {0} is empty")]
    EmptySource(String),
    #[error("Malformed payload popped from {queue}: {reason}")]
    MalformedPayload { queue: String, reason: String },
    #[error("{step} on {queue} failed: {source}")]
    TransferFailed {
        step: TransferStep,
        queue: String,
        source: Box<MqueueError>,
    },
    #[error("Redis connection is closed")]
    ConnectionClosed,
    #[error("Connecting to redis timed out after {0:?}")]
    ConnectTimeout(Duration),
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),
    #[error("Json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Std IO error: {0}")]
    StdIoError(#[from] std::io::Error),
}

impl MqueueError {
    pub fn is_empty_source(&self) -> bool {
        matches!(self, MqueueError::EmptySource(_))
    }
}
