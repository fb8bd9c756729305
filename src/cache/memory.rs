//! In-process cache store

use super::store::{expires_at, CacheResult, CacheStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Cache store backed by a map guarded by an async mutex
///
/// Entries expire with the same semantics as the other backends. Nothing is shared
/// between processes, so this is mainly useful for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if Utc::now() > entry.expires_at => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: expires_at(Utc::now(), ttl_seconds)?,
        };
        self.entries.lock().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn clear(&self) -> CacheResult<bool> {
        self.entries.lock().await.clear();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheError;
    use std::time::Duration as StdDuration;

    #[tokio::test]
    async fn test_value_is_available_immediately_after_set() {
        let cache = MemoryCache::new();

        cache.set("hugvisindasvid", "[]", 600).await.unwrap();

        assert_eq!(cache.get("hugvisindasvid").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_value_is_absent_after_ttl_elapses() {
        let cache = MemoryCache::new();

        cache.set("stats", "{}", 0).await.unwrap();
        tokio::time::sleep(StdDuration::from_millis(10)).await;

        assert!(cache.get("stats").await.unwrap().is_none());
        assert!(cache.is_empty().await, "Expired entry should be dropped on read");
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_value() {
        let cache = MemoryCache::new();

        cache.set("key", "old", 600).await.unwrap();
        cache.set("key", "new", 600).await.unwrap();

        assert_eq!(cache.get("key").await.unwrap().as_deref(), Some("new"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_oversized_ttl_is_rejected_without_storing() {
        let cache = MemoryCache::new();

        let result = cache.set("k", "v", 100_000_000_000_000_000).await;

        assert!(matches!(result, Err(CacheError::InvalidTtl(_))));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear_flushes_every_key() {
        let cache = MemoryCache::new();
        cache.set("a", "1", 600).await.unwrap();
        cache.set("b", "2", 600).await.unwrap();

        assert!(cache.clear().await.unwrap());

        assert!(cache.get("a").await.unwrap().is_none());
        assert!(cache.get("b").await.unwrap().is_none());
    }
}
