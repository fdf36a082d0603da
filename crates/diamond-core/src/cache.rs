//! In-process prediction cache.
//!
//! Used when caching is enabled but no Redis URL is configured. Entries live
//! for the TTL the cache was built with; the per-call `ttl` argument is
//! ignored because moka applies expiry cache-wide.

use std::time::Duration;

use moka::future::Cache;

use crate::error::AppError;
use crate::traits::PredictionCache;

const DEFAULT_CAPACITY: u64 = 10_000;

#[derive(Clone)]
pub struct MemoryCache {
    inner: Cache<String, String>,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(ttl: Duration, capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }
}

impl PredictionCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.inner.get(key).await)
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) -> Result<(), AppError> {
        self.inner.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
