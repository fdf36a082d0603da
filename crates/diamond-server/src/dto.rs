use serde::{Deserialize, Serialize};

use diamond_core::CacheStatus;
use diamond_core::catalog::{ModelInfo, ModelMetrics, TrainingAccepted};

use crate::system::SystemSnapshot;

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ModelStatus {
    pub version: String,
    pub loaded: bool,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: ModelStatus,
    /// Unix seconds
    pub timestamp: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DetailedModelStatus {
    pub version: String,
    pub loaded: bool,
    pub weights_path: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CacheStatusResponse {
    pub enabled: bool,
    /// Whether the backend answered a ping just now
    pub connected: bool,
    /// Entry lifetime in seconds
    pub ttl: u64,
    /// `redis`, `memory`, or `none`
    pub backend: String,
}

impl From<CacheStatus> for CacheStatusResponse {
    fn from(status: CacheStatus) -> Self {
        Self {
            enabled: status.enabled,
            connected: status.connected,
            ttl: status.ttl,
            backend: status.backend.to_string(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DetailedHealthResponse {
    pub status: &'static str,
    pub model: DetailedModelStatus,
    pub system: SystemSnapshot,
    pub cache: CacheStatusResponse,
    pub timestamp: f64,
}

// ---------------------------------------------------------------------------
// Model info & metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ScoresResponse {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ModelInfoResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub features: Vec<String>,
    pub metrics: ScoresResponse,
    pub timestamp: f64,
}

impl ModelInfoResponse {
    pub fn new(info: ModelInfo, timestamp: f64) -> Self {
        Self {
            name: info.name,
            version: info.version,
            description: info.description,
            features: info.features,
            metrics: ScoresResponse {
                accuracy: info.metrics.accuracy,
                precision: info.metrics.precision,
                recall: info.metrics.recall,
            },
            timestamp,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TrainingDataResponse {
    pub start_date: String,
    pub end_date: String,
    pub samples: u64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PerformanceResponse {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct InferenceTimeResponse {
    pub average_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ModelMetricsResponse {
    pub model_version: String,
    pub training_data: TrainingDataResponse,
    pub performance: PerformanceResponse,
    pub inference_time: InferenceTimeResponse,
    pub last_evaluation: String,
    pub timestamp: f64,
}

impl ModelMetricsResponse {
    pub fn new(metrics: ModelMetrics, timestamp: f64) -> Self {
        Self {
            model_version: metrics.model_version,
            training_data: TrainingDataResponse {
                start_date: metrics.training_data.start_date,
                end_date: metrics.training_data.end_date,
                samples: metrics.training_data.samples,
            },
            performance: PerformanceResponse {
                accuracy: metrics.performance.accuracy,
                precision: metrics.performance.precision,
                recall: metrics.performance.recall,
                f1_score: metrics.performance.f1_score,
            },
            inference_time: InferenceTimeResponse {
                average_ms: metrics.inference_time.average_ms,
                p95_ms: metrics.inference_time.p95_ms,
                p99_ms: metrics.inference_time.p99_ms,
            },
            last_evaluation: metrics.last_evaluation,
            timestamp,
        }
    }
}

// ---------------------------------------------------------------------------
// Predictions
// ---------------------------------------------------------------------------

/// Documented shape of a prediction request.
///
/// The handler accepts any non-empty JSON value; these are the fields the
/// team, player and game models echo back.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PredictRequest {
    pub team_id: Option<serde_json::Value>,
    pub player_id: Option<serde_json::Value>,
    pub game_id: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Training
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TrainingResponse {
    pub status: String,
    pub model_type: String,
    pub job_id: String,
    /// Unix seconds
    pub estimated_completion: f64,
    pub message: String,
}

impl From<TrainingAccepted> for TrainingResponse {
    fn from(ack: TrainingAccepted) -> Self {
        Self {
            status: ack.status,
            model_type: ack.model_type,
            job_id: ack.job_id,
            estimated_completion: ack.estimated_completion,
            message: ack.message,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
