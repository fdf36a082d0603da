use std::time::Duration;

use diamond_cache::{CacheConfig, RedisCache};
use diamond_core::{AppError, MemoryCache, NullCache, PredictionCache};

/// The cache backend chosen at startup.
#[derive(Clone)]
pub enum CacheBackend {
    Redis(RedisCache),
    Memory(MemoryCache),
    Disabled(NullCache),
}

impl CacheBackend {
    /// Pick a backend from configuration.
    ///
    /// A Redis URL that cannot be reached is logged and leaves the server
    /// running without a cache; it does not fall back to memory.
    pub async fn from_config(config: &CacheConfig) -> Self {
        if !config.enabled {
            tracing::info!("Prediction cache disabled");
            return CacheBackend::Disabled(NullCache);
        }

        match &config.redis_url {
            Some(url) => match RedisCache::connect(url).await {
                Ok(cache) => CacheBackend::Redis(cache),
                Err(e) => {
                    tracing::error!(error = %e, "Redis connection error");
                    CacheBackend::Disabled(NullCache)
                }
            },
            None => {
                tracing::info!(ttl_secs = config.ttl.as_secs(), "Using in-memory prediction cache");
                CacheBackend::Memory(MemoryCache::new(config.ttl))
            }
        }
    }
}

impl PredictionCache for CacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        match self {
            CacheBackend::Redis(c) => c.get(key).await,
            CacheBackend::Memory(c) => c.get(key).await,
            CacheBackend::Disabled(c) => c.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), AppError> {
        match self {
            CacheBackend::Redis(c) => c.set(key, value, ttl).await,
            CacheBackend::Memory(c) => c.set(key, value, ttl).await,
            CacheBackend::Disabled(c) => c.set(key, value, ttl).await,
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        match self {
            CacheBackend::Redis(c) => c.ping().await,
            CacheBackend::Memory(c) => c.ping().await,
            CacheBackend::Disabled(c) => c.ping().await,
        }
    }

    fn backend(&self) -> &'static str {
        match self {
            CacheBackend::Redis(c) => c.backend(),
            CacheBackend::Memory(c) => c.backend(),
            CacheBackend::Disabled(c) => c.backend(),
        }
    }
}
