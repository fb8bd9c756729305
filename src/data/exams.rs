//! Exam schedule client
//!
//! Ties the cache, the remote source and the parsers together: every lookup checks
//! the cache first and only fetches and parses on a miss, storing the result with a
//! fixed time-to-live.

use super::parse::{parse_sections, parse_student_counts, ParseError};
use super::source::{ScheduleSource, SourceError, ALL_DEPARTMENTS};
use super::stats::{summarize, StatsError};
use super::{all_departments, get_department_by_slug, Department, DepartmentSection, StatsSummary};
use crate::cache::{CacheError, CacheStore};
use std::sync::Arc;
use thiserror::Error;

/// Time-to-live for cached schedules and stats in seconds
pub const CACHE_TTL_SECONDS: u64 = 600;

/// Cache key for the aggregated stats
pub const STATS_CACHE_KEY: &str = "stats";

/// Errors that can occur when fetching exams or stats
#[derive(Debug, Error)]
pub enum ExamError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    /// A payload could not be written to or read back from the cache
    #[error("Failed to (de)serialize cached payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Client for department exam schedules and overall student statistics
///
/// The cache store and the schedule source are injected, so the same client runs
/// against Redis and the live endpoint in production and against in-memory fakes in
/// tests. Concurrent misses for the same key may both fetch; the last write wins.
#[derive(Clone)]
pub struct ExamClient {
    cache: Arc<dyn CacheStore>,
    source: Arc<dyn ScheduleSource>,
    ttl_seconds: u64,
}

impl ExamClient {
    /// Creates a client with the default [`CACHE_TTL_SECONDS`]
    pub fn new(cache: Arc<dyn CacheStore>, source: Arc<dyn ScheduleSource>) -> Self {
        Self {
            cache,
            source,
            ttl_seconds: CACHE_TTL_SECONDS,
        }
    }

    /// Overrides the cache time-to-live
    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Returns the static list of known departments
    pub fn departments(&self) -> &'static [Department] {
        all_departments()
    }

    /// Fetches the exam schedule of a department
    ///
    /// # Returns
    /// * `Ok(Some(sections))` - Sections from the cache, or freshly fetched and cached
    /// * `Ok(None)` - The slug is not a known department; nothing is fetched
    /// * `Err(ExamError)` - The cache, the request or the response failed
    pub async fn get_tests(&self, slug: &str) -> Result<Option<Vec<DepartmentSection>>, ExamError> {
        let Some(department) = get_department_by_slug(slug) else {
            tracing::debug!(slug, "unknown department");
            return Ok(None);
        };

        if let Some(cached) = self.cache.get(department.slug).await? {
            tracing::debug!(slug, "cache hit");
            return Ok(Some(serde_json::from_str(&cached)?));
        }

        tracing::debug!(slug, index = department.index, "cache miss");
        let fragment = self.source.fetch_fragment(department.index).await?;
        let sections = parse_sections(&fragment)?;

        let payload = serde_json::to_string(&sections)?;
        self.cache
            .set(department.slug, &payload, self.ttl_seconds)
            .await?;

        Ok(Some(sections))
    }

    /// Computes student statistics over every exam of every department
    ///
    /// An empty schedule fails with [`StatsError::NoData`] and is not cached.
    pub async fn get_stats(&self) -> Result<StatsSummary, ExamError> {
        if let Some(cached) = self.cache.get(STATS_CACHE_KEY).await? {
            tracing::debug!("stats cache hit");
            return Ok(serde_json::from_str(&cached)?);
        }

        tracing::debug!("stats cache miss");
        let fragment = self.source.fetch_fragment(ALL_DEPARTMENTS).await?;
        let counts = parse_student_counts(&fragment)?;
        let stats = summarize(&counts)?;

        let payload = serde_json::to_string(&stats)?;
        self.cache
            .set(STATS_CACHE_KEY, &payload, self.ttl_seconds)
            .await?;

        Ok(stats)
    }

    /// Flushes every cached entry, returning the store's success flag
    pub async fn clear_cache(&self) -> Result<bool, ExamError> {
        let cleared = self.cache.clear().await?;
        tracing::info!(cleared, "cache cleared");
        Ok(cleared)
    }
}
