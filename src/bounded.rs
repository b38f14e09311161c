use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::report::{Outcome, Report};
use crate::resolver::resolve_count;
use crate::store::QueueStore;
use crate::transfer::transfer;

/// One-shot run: resolves how many elements to move, moves them, and stops at
/// the first failed transfer without retrying it.
///
/// The cancellation token is checked before each transfer; a transfer already
/// issued always finishes.
pub async fn run<S>(store: &mut S, config: &Config, cancel_token: &CancellationToken) -> Report
where
    S: QueueStore + ?Sized,
{
    let mut report = Report::start(config);

    let count = match resolve_count(store, config).await {
        Ok(count) => count,
        Err(e) if e.is_empty_source() => {
            tracing::info!(queue = config.source, "Source queue is empty, nothing to do");
            return report.finish(0, Outcome::NothingToDo);
        }
        Err(e) => {
            tracing::error!(queue = config.source, "Could not resolve queue length: {}", e);
            return report.finish(
                0,
                Outcome::Aborted {
                    reason: e.to_string(),
                },
            );
        }
    };
    report.expected = Some(count);

    tracing::info!(
        source = config.source,
        destination = config.destination,
        direction = %config.direction,
        expected = count,
        "Starting bounded transfer"
    );

    let mut processed = 0;

    for _ in 0..count {
        if cancel_token.is_cancelled() {
            tracing::info!("Processed {} / {} before shutdown", processed, count);
            return report.finish(processed, Outcome::Interrupted);
        }

        if let Err(e) = transfer(store, config, &mut processed).await {
            tracing::error!("{}", e);
            tracing::info!("Processed {} / {}", processed, count);
            return report.finish(
                processed,
                Outcome::Aborted {
                    reason: e.to_string(),
                },
            );
        }
    }

    report.finish(processed, Outcome::Completed)
}
