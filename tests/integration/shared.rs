use rand::distr::{Alphanumeric, SampleString};
use redis::AsyncCommands;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn setup() -> redis::Client {
    dotenvy::from_filename(".env.test").ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let redis_url = std::env::var("REDIS_URL").expect("REDIS_URL is not set");
    redis::Client::open(redis_url.clone()).expect("Failed to open Redis client")
}

pub async fn store(
    client: &redis::Client,
) -> Result<(redis_mqueue::RedisStore, redis::aio::ConnectionManager), redis::RedisError> {
    let manager = redis::aio::ConnectionManager::new(client.clone()).await?;
    Ok((
        redis_mqueue::RedisStore::from_connection_manager(manager.clone()),
        manager,
    ))
}

pub fn random_queue() -> String {
    format!("mqueue:test:{}", Alphanumeric.sample_string(&mut rand::rng(), 16))
}

pub async fn seed(
    redis: &mut redis::aio::ConnectionManager,
    queue: &str,
    elements: &[&str],
) -> Result<(), redis::RedisError> {
    let _: u64 = redis.rpush(queue, elements).await?;
    Ok(())
}

pub async fn elements(
    redis: &mut redis::aio::ConnectionManager,
    queue: &str,
) -> Result<Vec<String>, redis::RedisError> {
    redis.lrange(queue, 0, -1).await
}
