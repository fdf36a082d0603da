use std::fmt;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Name reported for the placeholder model.
pub const MODEL_NAME: &str = "baseball-analytics-model";

/// Which static payload a model type resolves to.
///
/// Parsed from the `{type}` path segment. Unknown types are not an error:
/// they fall through to [`ModelKind::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Team,
    Player,
    Game,
    Generic,
}

impl ModelKind {
    pub fn parse(model_type: &str) -> Self {
        match model_type {
            "team" => ModelKind::Team,
            "player" => ModelKind::Player,
            "game" => ModelKind::Game,
            _ => ModelKind::Generic,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelKind::Team => "team",
            ModelKind::Player => "player",
            ModelKind::Game => "game",
            ModelKind::Generic => "generic",
        };
        f.write_str(s)
    }
}

/// The model handle held for the lifetime of the server.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoadedModel {
    pub name: String,
    pub version: String,
    pub weights_path: String,
    pub loaded: bool,
}

impl LoadedModel {
    /// "Load" the model: there are no weights to read, so this only logs and
    /// waits out `delay` to mimic a real load.
    pub async fn load(version: &str, weights_path: &str, delay: Duration) -> Self {
        tracing::info!("Loading model version {version} from {weights_path}");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let model = Self {
            name: MODEL_NAME.to_string(),
            version: version.to_string(),
            weights_path: weights_path.to_string(),
            loaded: true,
        };
        tracing::info!(name = %model.name, version = %model.version, "Model loaded");
        model
    }
}

/// Compute a SHA-256 hash of a string, returned as 64-char hex.
pub fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Cache key for a prediction request: `model:{type}:predict:{hash}`.
///
/// The hash is taken over the input with object keys sorted, so two bodies
/// that differ only in key order share a cache entry.
pub fn cache_key(model_type: &str, input: &Value) -> String {
    let canonical = canonicalize(input).to_string();
    format!("model:{model_type}:predict:{}", compute_hash(&canonical))
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let sorted = keys
                .into_iter()
                .map(|k| (k.clone(), canonicalize(&map[k])))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Current time as fractional unix seconds.
pub fn unix_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
