//! Test utilities: a recording mock of the cache trait.
//!
//! Uses `Arc<Mutex<_>>` for interior mutability so tests can assert on
//! what the service stored after the fact.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::AppError;
use crate::traits::PredictionCache;

// ---------------------------------------------------------------------------
// MockCache
// ---------------------------------------------------------------------------

/// Mock cache backed by a `HashMap`, optionally failing every call.
#[derive(Clone, Default)]
pub struct MockCache {
    entries: Arc<Mutex<HashMap<String, String>>>,
    stored: Arc<Mutex<Vec<(String, String, Duration)>>>,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl MockCache {
    /// Empty, healthy cache.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Healthy cache pre-seeded with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let cache = Self::default();
        cache
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        cache
    }

    /// Cache whose every call returns a connection error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Every `set` call seen so far, in order.
    pub fn stored(&self) -> Vec<(String, String, Duration)> {
        self.stored.lock().unwrap().clone()
    }

    /// Number of `get`/`set` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            Err(AppError::CacheError("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl PredictionCache for MockCache {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.stored
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string(), ttl));
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }

    fn backend(&self) -> &'static str {
        "mock"
    }
}
