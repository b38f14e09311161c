use futures::StreamExt;
use signal_hook_tokio::Signals;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::MqueueError;

const FORCED_EXIT_STATUS: i32 = 130;

/// Cancels `cancel_token` on the first of `signals`.
///
/// A second signal exits the process right away, for a transfer stuck on an
/// unresponsive connection. The listener stops once the token is cancelled
/// from anywhere else.
pub fn listen(
    signals: &[i32],
    cancel_token: CancellationToken,
) -> Result<JoinHandle<()>, MqueueError> {
    let mut signals = Signals::new(signals)?;
    let handle = signals.handle();

    Ok(tokio::spawn(async move {
        tokio::select! {
            signal = signals.next() => {
                if let Some(signal) = signal {
                    tracing::info!("Got signal: {}", signal);
                }
                cancel_token.cancel();
            }
            _ = cancel_token.cancelled() => {
                handle.close();
                return;
            }
        }

        if let Some(signal) = signals.next().await {
            tracing::warn!("Got signal {} again, exiting now", signal);
            std::process::exit(FORCED_EXIT_STATUS);
        }
    }))
}
