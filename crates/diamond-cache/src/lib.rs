pub mod config;
pub mod redis_cache;

pub use config::CacheConfig;
pub use redis_cache::RedisCache;
