//! The cache store contract shared by every backend

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Longest time-to-live accepted from the command line (one year)
pub const MAX_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Errors that can occur while talking to a cache backend
#[derive(Debug, Error)]
pub enum CacheError {
    /// The Redis server rejected a command or the connection failed
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Reading or writing a cache file failed
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored entry could not be encoded or decoded
    #[error("Cache entry serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The time-to-live does not fit a timestamp
    #[error("Invalid cache TTL: {0} seconds")]
    InvalidTtl(u64),
}

/// Convenience alias for cache operation results
pub type CacheResult<T> = Result<T, CacheError>;

/// Computes the expiry timestamp of an entry written at `now`
pub(crate) fn expires_at(now: DateTime<Utc>, ttl_seconds: u64) -> CacheResult<DateTime<Utc>> {
    i64::try_from(ttl_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or(CacheError::InvalidTtl(ttl_seconds))
}

/// Key-value store holding serialized payloads with a time-to-live
///
/// Values are opaque strings (JSON text in practice). Implementations must treat an
/// expired entry exactly like a missing one.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` if it is missing or expired
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key` for `ttl_seconds`, replacing any previous value
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Removes every key, returning whether the backend reported success
    async fn clear(&self) -> CacheResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_at_adds_ttl() {
        let now = Utc::now();
        assert_eq!(expires_at(now, 600).unwrap(), now + Duration::seconds(600));
        assert_eq!(expires_at(now, 0).unwrap(), now);
    }

    #[test]
    fn test_expires_at_rejects_out_of_range_ttl() {
        let now = Utc::now();
        for ttl in [100_000_000_000_000_000, i64::MAX as u64, u64::MAX] {
            assert!(matches!(expires_at(now, ttl), Err(CacheError::InvalidTtl(t)) if t == ttl));
        }
    }
}
