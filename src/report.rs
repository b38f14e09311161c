use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{Config, Mode, Protocol};
use crate::direction::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Every planned transfer went through.
    Completed,
    /// Bounded run against an empty source.
    NothingToDo,
    /// Bounded run stopped by a failure.
    Aborted { reason: String },
    /// Stopped by a termination signal.
    Interrupted,
}

/// What a run did. Never carries payloads, only counts.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: String,
    pub destination: String,
    pub direction: Direction,
    pub mode: Mode,
    pub protocol: Protocol,
    pub processed: u64,
    pub expected: Option<u64>,
    pub outcome: Outcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl Report {
    pub(crate) fn start(config: &Config) -> Self {
        let now = Utc::now();
        Self {
            source: config.source.clone(),
            destination: config.destination.clone(),
            direction: config.direction,
            mode: config.mode,
            protocol: config.protocol,
            processed: 0,
            expected: None,
            outcome: Outcome::Completed,
            started_at: now,
            finished_at: now,
        }
    }

    pub(crate) fn finish(mut self, processed: u64, outcome: Outcome) -> Self {
        self.processed = processed;
        self.outcome = outcome;
        self.finished_at = Utc::now();
        self
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Aborted { .. })
    }

    /// True when a bounded run ended before reaching its planned count.
    pub fn stopped_early(&self) -> bool {
        self.expected.is_some_and(|expected| self.processed < expected)
    }

    pub fn summary(&self) -> String {
        match self.expected {
            Some(expected) if self.stopped_early() => {
                format!("Processed {} / {}", self.processed, expected)
            }
            _ => format!("Processed {}", self.processed),
        }
    }
}
