use tokio_util::sync::CancellationToken;

use crate::config::{Config, Mode};
use crate::report::Report;
use crate::store::QueueStore;
use crate::{bounded, daemon};

/// Runs the transfer loop selected by `config.mode` and releases the store
/// once the loop returns.
///
/// # Arguments
///
/// * `store` - An open connection to the store holding both queues
/// * `config` - The validated transfer configuration
/// * `cancel_token` - Cancelled when the run should stop at the next iteration boundary
///
/// # Returns
///
/// Returns a [`Report`] with the number of elements that reached the destination.
///
/// # Examples
///
/// ```rust
/// use redis_mqueue::{Config, ConnectionConfig, RedisStore};
///
/// async fn requeue() -> Result<(), redis_mqueue::MqueueError> {
///     let config = Config::new("jobs:failed", "jobs", "RTL")?;
///     let mut store = RedisStore::connect(&ConnectionConfig::new("redis://127.0.0.1")).await?;
///
///     let report = redis_mqueue::run(&mut store, &config, Default::default()).await;
///     println!("{}", report.summary());
///
///     Ok(())
/// }
/// ```
pub async fn run<S>(store: &mut S, config: &Config, cancel_token: CancellationToken) -> Report
where
    S: QueueStore,
{
    let report = match config.mode {
        Mode::Bounded => bounded::run(store, config, &cancel_token).await,
        Mode::Daemon => daemon::run(store, config, &cancel_token).await,
    };

    if let Err(e) = store.close().await {
        tracing::warn!("Failed to close connection: {}", e);
    }

    tracing::trace!("Transfer loop finished");

    report
}
