//! Redis-backed cache store

use super::store::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

/// Default Redis address, database 0
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/0";

/// Cache store talking to a Redis server over a multiplexed connection
///
/// Values are stored with `SET key value EX ttl`, so expiry is handled by Redis
/// itself. The connection is opened by [`RedisCache::connect`] and released by
/// [`RedisCache::close`] (or on drop).
#[derive(Clone)]
pub struct RedisCache {
    conn: MultiplexedConnection,
}

impl RedisCache {
    /// Opens a connection to the Redis server at `url`
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        tracing::debug!(url, "connected to redis");
        Ok(Self { conn })
    }

    /// Closes the connection
    pub fn close(self) {
        drop(self.conn);
        tracing::debug!("redis connection closed");
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let seconds = expire_seconds(ttl_seconds)?;
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, value, seconds).await?;
        Ok(())
    }

    async fn clear(&self) -> CacheResult<bool> {
        let mut conn = self.conn.clone();
        let reply: String = redis::cmd("FLUSHALL").query_async(&mut conn).await?;
        Ok(flush_succeeded(&reply))
    }
}

/// Redis rejects `SET ... EX 0`, so a zero TTL is refused before any command is sent
fn expire_seconds(ttl_seconds: u64) -> CacheResult<u64> {
    if ttl_seconds == 0 {
        return Err(CacheError::InvalidTtl(ttl_seconds));
    }
    Ok(ttl_seconds)
}

fn flush_succeeded(reply: &str) -> bool {
    reply == "OK"
}
