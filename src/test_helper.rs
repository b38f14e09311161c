use std::collections::{HashMap, HashSet, VecDeque};
use tokio_util::sync::CancellationToken;

use crate::MqueueError;
use crate::direction::End;
use crate::store::QueueStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub command: &'static str,
    pub queue: String,
}

impl Call {
    pub fn new(command: &'static str, queue: &str) -> Self {
        Self {
            command,
            queue: queue.to_string(),
        }
    }
}

/// In-memory lists with scripted failures. Pop and push calls are numbered
/// from 1 in the order they are issued.
#[derive(Default)]
pub struct MemoryStore {
    queues: HashMap<String, VecDeque<Vec<u8>>>,
    calls: Vec<Call>,
    pops: usize,
    pushes: usize,
    failing_pops: HashSet<usize>,
    malformed_pops: HashSet<usize>,
    failing_pushes: HashSet<usize>,
    failing_len: bool,
    cancel_after_pops: Option<(usize, CancellationToken)>,
    closed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queue<const N: usize>(mut self, queue: &str, elements: [&str; N]) -> Self {
        self.queues.insert(
            queue.to_string(),
            elements.iter().map(|e| e.as_bytes().to_vec()).collect(),
        );
        self
    }

    pub fn failing_pops(mut self, calls: impl IntoIterator<Item = usize>) -> Self {
        self.failing_pops.extend(calls);
        self
    }

    pub fn malformed_pops(mut self, calls: impl IntoIterator<Item = usize>) -> Self {
        self.malformed_pops.extend(calls);
        self
    }

    pub fn failing_pushes(mut self, calls: impl IntoIterator<Item = usize>) -> Self {
        self.failing_pushes.extend(calls);
        self
    }

    pub fn failing_len(mut self) -> Self {
        self.failing_len = true;
        self
    }

    /// Cancels `token` as soon as the `pops`-th pop has been issued.
    pub fn cancel_after_pops(mut self, pops: usize, token: CancellationToken) -> Self {
        self.cancel_after_pops = Some((pops, token));
        self
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn pops(&self) -> usize {
        self.pops
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn elements(&self, queue: &str) -> Vec<String> {
        self.queues
            .get(queue)
            .map(|q| {
                q.iter()
                    .map(|e| String::from_utf8_lossy(e).into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn next_pop(&mut self) -> Result<usize, MqueueError> {
        self.pops += 1;
        let n = self.pops;

        if let Some((after, token)) = &self.cancel_after_pops {
            if n >= *after {
                token.cancel();
            }
        }

        if self.failing_pops.contains(&n) {
            return Err(connection_reset());
        }
        Ok(n)
    }

    fn take(&mut self, queue: &str, end: End) -> Option<Vec<u8>> {
        let list = self.queues.get_mut(queue)?;
        match end {
            End::Left => list.pop_front(),
            End::Right => list.pop_back(),
        }
    }

    fn put(&mut self, queue: &str, end: End, element: Vec<u8>) -> u64 {
        let list = self.queues.entry(queue.to_string()).or_default();
        match end {
            End::Left => list.push_front(element),
            End::Right => list.push_back(element),
        }
        list.len() as u64
    }
}

fn connection_reset() -> MqueueError {
    redis::RedisError::from(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        "connection reset by peer",
    ))
    .into()
}

#[async_trait::async_trait]
impl QueueStore for MemoryStore {
    async fn pop(&mut self, queue: &str, end: End) -> Result<Option<Vec<u8>>, MqueueError> {
        self.calls.push(Call::new(end.pop_command(), queue));
        let n = self.next_pop()?;
        let element = self.take(queue, end);

        if element.is_some() && self.malformed_pops.contains(&n) {
            return Err(MqueueError::MalformedPayload {
                queue: queue.to_string(),
                reason: "unexpected reply type".to_string(),
            });
        }
        Ok(element)
    }

    async fn push(&mut self, queue: &str, end: End, element: &[u8]) -> Result<u64, MqueueError> {
        self.calls.push(Call::new(end.push_command(), queue));
        self.pushes += 1;

        if self.failing_pushes.contains(&self.pushes) {
            return Err(redis::RedisError::from((
                redis::ErrorKind::ResponseError,
                "WRONGTYPE Operation against a key holding the wrong kind of value",
            ))
            .into());
        }
        Ok(self.put(queue, end, element.to_vec()))
    }

    async fn len(&mut self, queue: &str) -> Result<u64, MqueueError> {
        self.calls.push(Call::new("LLEN", queue));

        if self.failing_len {
            return Err(connection_reset());
        }
        Ok(self.queues.get(queue).map_or(0, |q| q.len() as u64))
    }

    async fn move_element(
        &mut self,
        source: &str,
        destination: &str,
        from: End,
        to: End,
    ) -> Result<Option<Vec<u8>>, MqueueError> {
        self.calls.push(Call::new("LMOVE", source));
        self.next_pop()?;

        let Some(element) = self.take(source, from) else {
            return Ok(None);
        };
        self.put(destination, to, element.clone());
        Ok(Some(element))
    }

    async fn close(&mut self) -> Result<(), MqueueError> {
        self.closed = true;
        Ok(())
    }
}
