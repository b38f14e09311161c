//! Move elements between two redis lists.
//!
//! A run either moves a bounded number of elements and stops at the first
//! failure, or keeps moving elements as a daemon until it is interrupted.
//!
//! The default protocol pops an element from the source and then pushes it to
//! the destination. Those are two separate commands: an element popped by a
//! process that dies, or whose push fails, is lost. It is never duplicated.
//! [`Config::atomic`] switches to a single `LMOVE` (redis 6.2+) instead.

mod bounded;
mod config;
mod daemon;
mod direction;
mod error;
mod launcher;
mod redis_store;
mod report;
mod resolver;
mod store;
mod transfer;

pub mod shutdown;

#[cfg(test)]
mod test_helper;

pub use crate::config::{Config, Mode, Protocol};
pub use crate::direction::{Direction, End};
pub use crate::error::MqueueError;
pub use crate::launcher::run;
pub use crate::redis_store::{ConnectionConfig, RedisStore};
pub use crate::report::{Outcome, Report};
pub use crate::resolver::resolve_count;
pub use crate::store::QueueStore;
pub use crate::transfer::{TransferStep, Transferred, transfer};
