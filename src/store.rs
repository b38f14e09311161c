use crate::MqueueError;
use crate::direction::End;

/// The handful of list operations the transfer loop needs from a remote store.
///
/// `pop` and `move_element` return `Ok(None)` when the source list is empty.
#[async_trait::async_trait]
pub trait QueueStore: Send {
    async fn pop(&mut self, queue: &str, end: End) -> Result<Option<Vec<u8>>, MqueueError>;

    async fn push(&mut self, queue: &str, end: End, element: &[u8]) -> Result<u64, MqueueError>;

    async fn len(&mut self, queue: &str) -> Result<u64, MqueueError>;

    /// Atomically moves one element from `source` to `destination`.
    async fn move_element(
        &mut self,
        source: &str,
        destination: &str,
        from: End,
        to: End,
    ) -> Result<Option<Vec<u8>>, MqueueError>;

    /// Releases the connection. Called once when the run ends.
    async fn close(&mut self) -> Result<(), MqueueError>;
}
