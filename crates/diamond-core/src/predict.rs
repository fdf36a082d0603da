use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;

use crate::catalog;
use crate::error::AppError;
use crate::model::{ModelKind, cache_key, unix_timestamp};
use crate::traits::PredictionCache;

/// Whether and for how long predictions are cached.
#[derive(Debug, Clone, Copy)]
pub struct CacheSettings {
    pub enabled: bool,
    pub ttl: Duration,
}

impl CacheSettings {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ttl: Duration::ZERO,
        }
    }
}

/// Cache state as reported by the detailed health check.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub enabled: bool,
    pub connected: bool,
    pub ttl: u64,
    pub backend: &'static str,
}

/// Metadata attached to every freshly computed prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionMetadata {
    pub model_version: String,
    /// Seconds spent building the prediction.
    pub prediction_time: f64,
    pub timestamp: f64,
}

#[derive(Serialize)]
struct PredictionEnvelope {
    #[serde(flatten)]
    prediction: catalog::Prediction,
    metadata: PredictionMetadata,
}

/// Serves predictions, consulting the cache first when enabled.
///
/// Generic over the cache backend so the server can plug in Redis, the
/// in-process cache, or nothing at all.
#[derive(Clone)]
pub struct PredictionService<C>
where
    C: PredictionCache,
{
    cache: C,
    settings: CacheSettings,
    model_version: String,
}

impl<C> PredictionService<C>
where
    C: PredictionCache,
{
    pub fn new(cache: C, settings: CacheSettings, model_version: impl Into<String>) -> Self {
        Self {
            cache,
            settings,
            model_version: model_version.into(),
        }
    }

    pub fn settings(&self) -> CacheSettings {
        self.settings
    }

    /// Run a prediction for `model_type` on `input`.
    ///
    /// 1. Reject empty input
    /// 2. Return a cached result if one exists
    /// 3. Build the static payload and attach metadata
    /// 4. Store the result in the cache
    ///
    /// Cache failures in steps 2 and 4 are logged and otherwise ignored.
    pub async fn predict(&self, model_type: &str, input: &Value) -> Result<Value, AppError> {
        let start = Instant::now();

        if is_empty_input(input) {
            return Err(AppError::InvalidInput("No input data provided".into()));
        }

        let key = self
            .settings
            .enabled
            .then(|| cache_key(model_type, input));

        if let Some(key) = &key {
            if let Some(cached) = self.lookup(key).await {
                return Ok(cached);
            }
        }

        let kind = ModelKind::parse(model_type);
        tracing::info!(%model_type, %kind, input = %input, "Running prediction");
        let envelope = PredictionEnvelope {
            prediction: catalog::prediction(kind, input),
            metadata: PredictionMetadata {
                model_version: self.model_version.clone(),
                prediction_time: start.elapsed().as_secs_f64(),
                timestamp: unix_timestamp(),
            },
        };
        let result = serde_json::to_value(&envelope)?;

        if let Some(key) = &key {
            match self
                .cache
                .set(key, &result.to_string(), self.settings.ttl)
                .await
            {
                Ok(()) => tracing::debug!("Cached result for {key}"),
                Err(e) => tracing::error!(error = %e, "Failed to cache result"),
            }
        }

        Ok(result)
    }

    async fn lookup(&self, key: &str) -> Option<Value> {
        let raw = match self.cache.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(error = %e, "Cache lookup failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::info!("Cache hit for {key}");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable cache entry for {key}");
                None
            }
        }
    }

    /// Current cache state, pinging the backend when caching is enabled.
    pub async fn cache_status(&self) -> CacheStatus {
        let connected = self.settings.enabled && self.cache.ping().await.is_ok();
        CacheStatus {
            enabled: self.settings.enabled,
            connected,
            ttl: self.settings.ttl.as_secs(),
            backend: self.cache.backend(),
        }
    }
}

/// True for bodies that carry no input at all: `null`, `false`, `0`, `""`,
/// `[]` and `{}`.
pub fn is_empty_input(input: &Value) -> bool {
    match input {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
