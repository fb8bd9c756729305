//! Cache stores for fetched exam schedules
//!
//! Every backend implements [`CacheStore`]: string values keyed by department slug
//! (or `"stats"`) with a time-to-live in seconds. [`RedisCache`] is the production
//! backend, [`FileCache`] persists to the XDG cache directory, and [`MemoryCache`]
//! keeps everything in-process.

mod file;
mod memory;
mod redis_cache;
mod store;

pub use file::FileCache;
pub use memory::MemoryCache;
pub use redis_cache::{RedisCache, DEFAULT_REDIS_URL};
pub use store::{CacheError, CacheResult, CacheStore, MAX_TTL_SECONDS};
