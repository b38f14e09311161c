use redis::AsyncCommands;
use std::time::Duration;

use crate::MqueueError;
use crate::direction::End;
use crate::store::QueueStore;
use crate::transfer::printable;

const DEFAULT_CLIENT_NAME: &str = "redis-mqueue";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub url: String,
    pub client_name: String,
    pub connect_timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn from_host_port(host: &str, port: u16) -> Self {
        Self::new(format!("redis://{host}:{port}"))
    }

    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// [`QueueStore`] backed by a single reconnecting redis connection.
///
/// Once [`QueueStore::close`] has run every operation fails with
/// [`MqueueError::ConnectionClosed`].
pub struct RedisStore {
    conn: Option<redis::aio::ConnectionManager>,
}

impl RedisStore {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, MqueueError> {
        let client = redis::Client::open(config.url.as_str())?;
        let mut conn = tokio::time::timeout(
            config.connect_timeout,
            redis::aio::ConnectionManager::new(client),
        )
        .await
        .map_err(|_| MqueueError::ConnectTimeout(config.connect_timeout))??;

        let _: () = redis::cmd("CLIENT")
            .arg("SETNAME")
            .arg(&config.client_name)
            .query_async(&mut conn)
            .await?;

        tracing::debug!(client_name = config.client_name, "Connected to redis");

        Ok(Self { conn: Some(conn) })
    }

    pub fn from_connection_manager(conn: redis::aio::ConnectionManager) -> Self {
        Self { conn: Some(conn) }
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    fn connection(&mut self) -> Result<&mut redis::aio::ConnectionManager, MqueueError> {
        self.conn.as_mut().ok_or(MqueueError::ConnectionClosed)
    }

    fn decode(queue: &str, value: redis::Value) -> Result<Option<Vec<u8>>, MqueueError> {
        if let redis::Value::Nil = value {
            return Ok(None);
        }

        redis::from_redis_value::<Vec<u8>>(&value)
            .map(Some)
            .map_err(|e| {
                let reply = printable(format!("{value:?}").as_bytes());
                MqueueError::MalformedPayload {
                    queue: queue.to_string(),
                    reason: format!("{e} (reply: {reply})"),
                }
            })
    }
}

#[async_trait::async_trait]
impl QueueStore for RedisStore {
    async fn pop(&mut self, queue: &str, end: End) -> Result<Option<Vec<u8>>, MqueueError> {
        let value: redis::Value = redis::cmd(end.pop_command())
            .arg(queue)
            .query_async(self.connection()?)
            .await?;
        Self::decode(queue, value)
    }

    async fn push(&mut self, queue: &str, end: End, element: &[u8]) -> Result<u64, MqueueError> {
        let len: u64 = redis::cmd(end.push_command())
            .arg(queue)
            .arg(element)
            .query_async(self.connection()?)
            .await?;
        Ok(len)
    }

    async fn len(&mut self, queue: &str) -> Result<u64, MqueueError> {
        let len: u64 = self.connection()?.llen(queue).await?;
        Ok(len)
    }

    async fn move_element(
        &mut self,
        source: &str,
        destination: &str,
        from: End,
        to: End,
    ) -> Result<Option<Vec<u8>>, MqueueError> {
        let value: redis::Value = redis::cmd("LMOVE")
            .arg(source)
            .arg(destination)
            .arg(from.as_arg())
            .arg(to.as_arg())
            .query_async(self.connection()?)
            .await?;
        Self::decode(source, value)
    }

    async fn close(&mut self) -> Result<(), MqueueError> {
        if self.conn.take().is_some() {
            tracing::debug!("Closed redis connection");
        }
        Ok(())
    }
}
