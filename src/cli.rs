//! Command-line interface parsing for proftafla
//!
//! Handles the global cache/endpoint options and the subcommands, and turns them
//! into a [`StartupConfig`] the binary builds its cache store and source from.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::cache::{CacheError, FileCache, DEFAULT_REDIS_URL, MAX_TTL_SECONDS};
use crate::data::{SourceConfig, CACHE_TTL_SECONDS};

/// Error types for CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// The slug does not name a known department
    #[error("Unknown department: '{0}'. Run `proftafla departments` to list valid slugs")]
    UnknownDepartment(String),

    /// No cache directory was given and none could be determined
    #[error("Could not determine a cache directory; pass --cache-dir")]
    NoCacheDir,

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Where fetched schedules are cached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CacheBackend {
    /// Redis server (shared, TTL handled by Redis)
    #[default]
    Redis,
    /// JSON files in the user cache directory
    File,
    /// In-process only, nothing survives the run
    Memory,
}

/// proftafla - University of Iceland exam schedules and statistics
#[derive(Parser, Debug)]
#[command(name = "proftafla")]
#[command(about = "Fetch, cache and summarize exam schedules")]
#[command(version)]
pub struct Cli {
    /// Cache backend to use
    #[arg(long, value_enum, env = "PROFTAFLA_CACHE", default_value_t = CacheBackend::Redis, global = true)]
    pub cache: CacheBackend,

    /// Redis connection URL (redis backend)
    #[arg(long, env = "REDIS_URL", default_value = DEFAULT_REDIS_URL, global = true)]
    pub redis_url: String,

    /// Cache directory (file backend); defaults to the platform cache directory
    #[arg(long, value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Schedule endpoint URL
    #[arg(long, env = "PROFTAFLA_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Cache time-to-live in seconds (at most one year)
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = CACHE_TTL_SECONDS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TTL_SECONDS),
        global = true
    )]
    pub ttl: u64,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 30, global = true)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the known departments
    Departments,
    /// Show the exam schedule of a department
    Tests {
        /// Department slug, e.g. hugvisindasvid
        slug: String,
    },
    /// Show student statistics over all exams
    Stats,
    /// Flush every cached entry
    ClearCache,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub backend: CacheBackend,
    pub redis_url: String,
    pub cache_dir: Option<PathBuf>,
    pub source: SourceConfig,
    pub ttl_seconds: u64,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        let mut source = SourceConfig {
            timeout: Duration::from_secs(cli.timeout),
            ..SourceConfig::default()
        };
        if let Some(endpoint) = &cli.endpoint {
            source.base_url = endpoint.clone();
        }

        StartupConfig {
            backend: cli.cache,
            redis_url: cli.redis_url.clone(),
            cache_dir: cli.cache_dir.clone(),
            source,
            ttl_seconds: cli.ttl,
        }
    }

    /// Builds the file cache, preferring an explicit --cache-dir
    pub fn file_cache(&self) -> Result<FileCache, CliError> {
        match &self.cache_dir {
            Some(dir) => Ok(FileCache::with_dir(dir.clone())),
            None => FileCache::new().ok_or(CliError::NoCacheDir),
        }
    }
}
