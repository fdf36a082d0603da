use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// Key-value store for serialized prediction results.
///
/// Implementations report failures as [`AppError::CacheError`]; the caller
/// decides whether a failure matters (for predictions it never does).
pub trait PredictionCache: Send + Sync + Clone {
    /// Look up a cached payload.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, AppError>> + Send;

    /// Store a payload that expires after `ttl`.
    fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Check the backend is reachable.
    fn ping(&self) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Short backend name for health output (e.g. `"redis"`).
    fn backend(&self) -> &'static str;
}

/// A cache that stores nothing and always misses.
#[derive(Debug, Clone)]
pub struct NullCache;

impl PredictionCache for NullCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), AppError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::CacheError("no cache backend configured".into()))
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}
