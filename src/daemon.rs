use std::time::Duration;
use tokio::select;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::report::{Outcome, Report};
use crate::store::QueueStore;
use crate::transfer::{Transferred, transfer};

/// Moves elements until `cancel_token` is cancelled.
///
/// Failed transfers are logged and the loop carries on, redis errors included:
/// the connection manager reconnects on the next tick. The token is checked
/// before every transfer, and pauses between ticks end as soon as it fires.
pub async fn run<S>(store: &mut S, config: &Config, cancel_token: &CancellationToken) -> Report
where
    S: QueueStore + ?Sized,
{
    let report = Report::start(config);
    let mut processed = 0;
    let mut failures: u64 = 0;

    tracing::info!(
        source = config.source,
        destination = config.destination,
        direction = %config.direction,
        "Starting daemon"
    );

    if config.limit > 0 {
        tracing::warn!(limit = config.limit, "Limit is ignored in daemon mode");
    }

    while !cancel_token.is_cancelled() {
        let pause = match transfer(store, config, &mut processed).await {
            Ok(Transferred::Moved) => Duration::ZERO,
            Ok(Transferred::SourceEmpty) => config.idle_interval,
            Err(e) => {
                failures += 1;
                tracing::error!(failures, "{}", e);
                config.error_backoff
            }
        };

        pause_or_cancel(pause, cancel_token).await;
    }

    tracing::info!(processed, failures, "Daemon stopped");

    report.finish(processed, Outcome::Interrupted)
}

async fn pause_or_cancel(pause: Duration, cancel_token: &CancellationToken) {
    if pause.is_zero() {
        tokio::task::yield_now().await;
        return;
    }

    select! {
        _ = tokio::time::sleep(pause) => {}
        _ = cancel_token.cancelled() => {}
    }
}
