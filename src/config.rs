use serde::Serialize;
use signal_hook::consts::{SIGINT, SIGTERM};
use std::time::Duration;

use crate::MqueueError;
use crate::direction::Direction;

const DEFAULT_IDLE_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// How the run is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// A fixed number of transfers, stopping at the first failure.
    Bounded,
    /// Transfers until interrupted, logging failures.
    Daemon,
}

/// How one element is carried between the queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Pop from the source, then push to the destination. An element popped
    /// but never pushed is lost.
    PopPush,
    /// A single `LMOVE`, requires redis 6.2 or newer.
    Move,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: String,
    pub destination: String,
    pub direction: Direction,
    pub limit: u64,
    pub mode: Mode,
    pub protocol: Protocol,
    pub idle_interval: Duration,
    pub error_backoff: Duration,
    pub shutdown_signals: Vec<i32>,
}

impl Config {
    /// Builds a validated configuration. Fails before anything touches redis
    /// when a queue name is blank or the direction code is unknown.
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        direction: &str,
    ) -> Result<Self, MqueueError> {
        let source = source.into();
        let destination = destination.into();

        if source.trim().is_empty() {
            return Err(MqueueError::MissingOption("source"));
        }
        if destination.trim().is_empty() {
            return Err(MqueueError::MissingOption("destination"));
        }
        if direction.trim().is_empty() {
            return Err(MqueueError::MissingOption("direction"));
        }

        Ok(Self {
            source,
            destination,
            direction: direction.parse()?,
            limit: 0,
            mode: Mode::Bounded,
            protocol: Protocol::PopPush,
            idle_interval: DEFAULT_IDLE_INTERVAL,
            error_backoff: DEFAULT_ERROR_BACKOFF,
            shutdown_signals: vec![SIGINT, SIGTERM],
        })
    }

    /// Caps a bounded run at `limit` transfers. Zero means "current source length".
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn daemon(mut self, daemon: bool) -> Self {
        self.mode = if daemon { Mode::Daemon } else { Mode::Bounded };
        self
    }

    pub fn atomic(mut self, atomic: bool) -> Self {
        self.protocol = if atomic {
            Protocol::Move
        } else {
            Protocol::PopPush
        };
        self
    }

    pub fn idle_interval(mut self, interval: Duration) -> Self {
        self.idle_interval = interval;
        self
    }

    pub fn error_backoff(mut self, backoff: Duration) -> Self {
        self.error_backoff = backoff;
        self
    }

    pub fn with_graceful_shutdown(mut self, signals: impl IntoIterator<Item = i32>) -> Self {
        self.shutdown_signals = signals.into_iter().collect();
        self
    }
}
