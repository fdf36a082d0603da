pub mod cache;
pub mod catalog;
pub mod error;
pub mod model;
pub mod predict;
pub mod traits;

#[cfg(test)]
pub mod testutil;

pub use cache::MemoryCache;
pub use error::AppError;
pub use model::{LoadedModel, ModelKind, cache_key, compute_hash, unix_timestamp};
pub use predict::{CacheSettings, CacheStatus, PredictionService};
pub use traits::{NullCache, PredictionCache};
