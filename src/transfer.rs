use std::fmt;

use crate::MqueueError;
use crate::config::{Config, Protocol};
use crate::store::QueueStore;

pub(crate) const MAX_LOGGED_PAYLOAD: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStep {
    Pop,
    Push,
    Move,
}

impl fmt::Display for TransferStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferStep::Pop => f.write_str("pop"),
            TransferStep::Push => f.write_str("push"),
            TransferStep::Move => f.write_str("move"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transferred {
    /// One element left the source and reached the destination.
    Moved,
    /// The source had nothing to give. Not an error.
    SourceEmpty,
}

/// Moves a single element from `config.source` to `config.destination`.
///
/// `counter` is incremented exactly once per element that reached the
/// destination. With [`Protocol::PopPush`] the element is removed from the
/// source before it is pushed: if the push fails, or the process dies in
/// between, that element is lost. It is never duplicated.
pub async fn transfer<S>(
    store: &mut S,
    config: &Config,
    counter: &mut u64,
) -> Result<Transferred, MqueueError>
where
    S: QueueStore + ?Sized,
{
    let (pop_end, push_end) = config.direction.ends();

    if config.protocol == Protocol::Move {
        let moved = store
            .move_element(&config.source, &config.destination, pop_end, push_end)
            .await
            .map_err(|e| step_failed(TransferStep::Move, &config.source, e))?;

        return Ok(match moved {
            Some(_) => {
                *counter += 1;
                Transferred::Moved
            }
            None => Transferred::SourceEmpty,
        });
    }

    let element = match store.pop(&config.source, pop_end).await {
        Ok(Some(element)) => element,
        Ok(None) => return Ok(Transferred::SourceEmpty),
        Err(e @ MqueueError::MalformedPayload { .. }) => {
            tracing::error!(queue = config.source, "Error occurred while popping data: {}", e);
            return Err(step_failed(TransferStep::Pop, &config.source, e));
        }
        Err(e) => return Err(step_failed(TransferStep::Pop, &config.source, e)),
    };

    if let Err(e) = store
        .push(&config.destination, push_end, &element)
        .await
    {
        tracing::error!(
            queue = config.destination,
            payload = printable(&element),
            "Error occurred while pushing data, element is lost: {}",
            e
        );
        return Err(step_failed(TransferStep::Push, &config.destination, e));
    }

    *counter += 1;
    Ok(Transferred::Moved)
}

fn step_failed(step: TransferStep, queue: &str, source: MqueueError) -> MqueueError {
    MqueueError::TransferFailed {
        step,
        queue: queue.to_string(),
        source: Box::new(source),
    }
}

/// Lossy, truncated rendering of a payload for log lines.
pub(crate) fn printable(element: &[u8]) -> String {
    let shown = &element[..element.len().min(MAX_LOGGED_PAYLOAD)];
    let mut text = String::from_utf8_lossy(shown).into_owned();
    if element.len() > MAX_LOGGED_PAYLOAD {
        text.push_str("...");
    }
    text
}
