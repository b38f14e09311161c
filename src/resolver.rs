use crate::MqueueError;
use crate::config::Config;
use crate::store::QueueStore;

/// Number of transfers a bounded run performs.
///
/// A positive `limit` wins without asking redis. Otherwise the current length
/// of the source is used, and an empty source is reported as
/// [`MqueueError::EmptySource`].
pub async fn resolve_count<S>(store: &mut S, config: &Config) -> Result<u64, MqueueError>
where
    S: QueueStore + ?Sized,
{
    if config.limit > 0 {
        return Ok(config.limit);
    }

    let len = store.len(&config.source).await?;
    if len < 1 {
        return Err(MqueueError::EmptySource(config.source.clone()));
    }

    tracing::debug!(queue = config.source, len, "Resolved source length");

    Ok(len)
}
