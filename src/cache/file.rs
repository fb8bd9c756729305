//! File-backed cache store
//!
//! Persists each entry as a JSON file with expiry timestamps, so cached schedules
//! survive between CLI invocations without a Redis server.

use super::store::{expires_at, CacheResult, CacheStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Wrapper struct for a cached value stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// The serialized payload
    value: String,
    /// When the value was cached
    cached_at: DateTime<Utc>,
    /// When the cache entry expires
    expires_at: DateTime<Utc>,
}

/// Stores cache entries as JSON files in a single directory
///
/// Uses an XDG-compliant cache directory (`~/.cache/proftafla/` on Linux) by default.
/// Expired entries read as absent and are removed on access. The directory may hold
/// other files; only files that decode as cache entries are ever removed.
#[derive(Debug, Clone)]
pub struct FileCache {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl FileCache {
    /// Creates a new FileCache using the platform cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "proftafla")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new FileCache with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the directory holding the cache files
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to a cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", file_stem(key)))
    }

    /// Reads and decodes a cache file, `None` if missing or not a cache entry
    async fn read_entry(path: &Path) -> CacheResult<Option<CacheEntry>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable cache file");
                Ok(None)
            }
        }
    }

    async fn remove_entry(path: &Path) -> CacheResult<()> {
        match fs::remove_file(path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CacheStore for FileCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let path = self.cache_path(key);
        let Some(entry) = Self::read_entry(&path).await? else {
            return Ok(None);
        };

        if Utc::now() > entry.expires_at {
            Self::remove_entry(&path).await?;
            return Ok(None);
        }

        Ok(Some(entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let now = Utc::now();
        let entry = CacheEntry {
            value: value.to_string(),
            cached_at: now,
            expires_at: expires_at(now, ttl_seconds)?,
        };

        let json = serde_json::to_string_pretty(&entry)?;
        fs::create_dir_all(&self.cache_dir).await?;
        fs::write(self.cache_path(key), json).await?;
        Ok(())
    }

    async fn clear(&self) -> CacheResult<bool> {
        let mut entries = match fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(true),
            Err(e) => return Err(e.into()),
        };

        while let Some(dir_entry) = entries.next_entry().await? {
            let path = dir_entry.path();
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            if !is_json || !dir_entry.file_type().await?.is_file() {
                continue;
            }
            if Self::read_entry(&path).await?.is_some() {
                Self::remove_entry(&path).await?;
            }
        }

        Ok(true)
    }
}

/// Maps a cache key onto a safe file name
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::thread;
    use std::time::Duration as StdDuration;
    use tempfile::TempDir;

    fn create_test_cache() -> (FileCache, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = FileCache::with_dir(temp_dir.path().to_path_buf());
        (cache, temp_dir)
    }

    #[tokio::test]
    async fn test_set_creates_file_in_cache_directory() {
        let (cache, temp_dir) = create_test_cache();

        cache
            .set("hugvisindasvid", "[{\"heading\":\"x\"}]", 600)
            .await
            .expect("Set should succeed");

        let expected_path = temp_dir.path().join("hugvisindasvid.json");
        assert!(expected_path.exists(), "Cache file should exist");

        let content = std_fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"value\""));
        assert!(content.contains("\"expires_at\""));
    }

    #[tokio::test]
    async fn test_get_returns_none_for_missing_key() {
        let (cache, _temp_dir) = create_test_cache();

        let result = cache.get("nonexistent_key").await.unwrap();

        assert!(result.is_none(), "Should return None for missing key");
    }

    #[tokio::test]
    async fn test_get_returns_value_for_fresh_entry() {
        let (cache, _temp_dir) = create_test_cache();

        cache.set("stats", "{\"min\":1}", 600).await.unwrap();

        assert_eq!(cache.get("stats").await.unwrap().as_deref(), Some("{\"min\":1}"));
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_absent_and_is_removed() {
        let (cache, temp_dir) = create_test_cache();

        // Zero TTL expires immediately
        cache.set("stats", "{}", 0).await.unwrap();
        thread::sleep(StdDuration::from_millis(10));

        assert!(cache.get("stats").await.unwrap().is_none());
        assert!(!temp_dir.path().join("stats.json").exists());
    }

    #[tokio::test]
    async fn test_overwrite_existing_entry() {
        let (cache, _temp_dir) = create_test_cache();

        cache.set("key", "first", 600).await.unwrap();
        cache.set("key", "second", 600).await.unwrap();

        assert_eq!(cache.get("key").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_set_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("cache");
        let cache = FileCache::with_dir(nested_path.clone());

        cache.set("nested_key", "1", 600).await.unwrap();

        assert!(nested_path.join("nested_key.json").exists());
    }

    #[tokio::test]
    async fn test_clear_removes_all_entries() {
        let (cache, _temp_dir) = create_test_cache();
        cache.set("a", "1", 600).await.unwrap();
        cache.set("b", "2", 600).await.unwrap();

        assert!(cache.clear().await.unwrap());

        assert!(cache.get("a").await.unwrap().is_none());
        assert!(cache.get("b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_keeps_files_it_did_not_write() {
        let (cache, temp_dir) = create_test_cache();
        let dir = temp_dir.path();
        std_fs::write(dir.join("thesis.docx"), "chapter 1").unwrap();
        std_fs::write(dir.join("settings.json"), "{\"theme\":\"dark\"}").unwrap();
        std_fs::create_dir(dir.join("drafts.json")).unwrap();
        cache.set("stats", "{}", 600).await.unwrap();

        assert!(cache.clear().await.unwrap());

        assert!(!dir.join("stats.json").exists());
        assert!(dir.join("thesis.docx").exists(), "Unrelated file should survive");
        assert!(dir.join("settings.json").exists(), "Foreign JSON should survive");
        assert!(dir.join("drafts.json").is_dir());
        assert!(dir.exists(), "Cache directory itself should remain");
    }

    #[tokio::test]
    async fn test_clear_on_missing_directory_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::with_dir(temp_dir.path().join("never-created"));

        assert!(cache.clear().await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_absent() {
        let (cache, temp_dir) = create_test_cache();
        std_fs::write(temp_dir.path().join("broken.json"), "not json").unwrap();

        assert!(cache.get("broken").await.unwrap().is_none());
        assert!(temp_dir.path().join("broken.json").exists(), "Foreign file is left alone");
    }

    #[tokio::test]
    async fn test_oversized_ttl_is_rejected_without_writing() {
        let (cache, temp_dir) = create_test_cache();

        let result = cache.set("stats", "{}", u64::MAX).await;

        assert!(matches!(result, Err(crate::cache::CacheError::InvalidTtl(_))));
        assert!(!temp_dir.path().join("stats.json").exists());
    }

    #[test]
    fn test_file_stem_replaces_unsafe_characters() {
        assert_eq!(file_stem("verkfraedi-og-natturuvisindasvid"), "verkfraedi-og-natturuvisindasvid");
        assert_eq!(file_stem("../etc/passwd"), "___etc_passwd");
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(cache) = FileCache::new() {
            let path_str = cache.dir().to_string_lossy();
            assert!(path_str.contains("proftafla"), "Cache path should contain project name");
        }
    }
}
