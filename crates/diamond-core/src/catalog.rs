//! Static payloads served by the placeholder model.
//!
//! Nothing here is computed: the numbers are fixed stand-ins for a real
//! model's output. Only identifiers from the request are echoed back.

use serde::Serialize;
use serde_json::Value;

use crate::model::ModelKind;

/// Features every model type claims to use.
pub const MODEL_FEATURES: [&str; 3] = ["team_performance", "player_stats", "game_predictions"];

/// How far in the future a queued training job claims it will finish.
pub const TRAINING_ESTIMATE_SECS: f64 = 3600.0;

// ---------------------------------------------------------------------------
// Info & metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationScores {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

const SCORES: ClassificationScores = ClassificationScores {
    accuracy: 0.92,
    precision: 0.89,
    recall: 0.91,
};

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub features: Vec<String>,
    pub metrics: ClassificationScores,
}

/// Metadata for the model behind `model_type`.
pub fn model_info(model_type: &str, version: &str) -> ModelInfo {
    ModelInfo {
        name: format!("baseball-analytics-{model_type}-model"),
        version: version.to_string(),
        description: format!(
            "Baseball Analytics {} model for predictions",
            model_type.to_uppercase()
        ),
        features: MODEL_FEATURES.iter().map(|f| f.to_string()).collect(),
        metrics: SCORES,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingData {
    pub start_date: String,
    pub end_date: String,
    pub samples: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Performance {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InferenceTime {
    pub average_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelMetrics {
    pub model_version: String,
    pub training_data: TrainingData,
    pub performance: Performance,
    pub inference_time: InferenceTime,
    pub last_evaluation: String,
}

/// Evaluation metrics. Identical for every model type.
pub fn model_metrics(version: &str) -> ModelMetrics {
    ModelMetrics {
        model_version: version.to_string(),
        training_data: TrainingData {
            start_date: "2015-01-01".to_string(),
            end_date: "2024-12-31".to_string(),
            samples: 150_000,
        },
        performance: Performance {
            accuracy: SCORES.accuracy,
            precision: SCORES.precision,
            recall: SCORES.recall,
            f1_score: 0.90,
        },
        inference_time: InferenceTime {
            average_ms: 45.3,
            p95_ms: 87.2,
            p99_ms: 112.8,
        },
        last_evaluation: "2025-01-15T00:00:00Z".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Predictions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct BattingLine {
    pub batting_avg: f64,
    pub on_base_pct: f64,
    pub slugging_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamPrediction {
    pub team_id: Value,
    pub win_probability: f64,
    pub run_expectancy: f64,
    pub projected_stats: BattingLine,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerProjection {
    pub batting_avg: f64,
    pub home_runs: u32,
    pub rbis: u32,
    pub war: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparablePlayer {
    pub id: u64,
    pub name: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerPrediction {
    pub player_id: Value,
    pub projection: PlayerProjection,
    pub comparable_players: Vec<ComparablePlayer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyFactor {
    pub factor: String,
    pub impact: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GamePrediction {
    pub game_id: Value,
    pub home_win_probability: f64,
    pub predicted_score: Score,
    pub key_factors: Vec<KeyFactor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryValue {
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenericPrediction {
    pub predictions: Vec<CategoryValue>,
}

/// A per-type prediction payload. Serializes as the bare variant body.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Prediction {
    Team(TeamPrediction),
    Player(PlayerPrediction),
    Game(GamePrediction),
    Generic(GenericPrediction),
}

/// Echo `field` from the request body, or `0` if the caller left it out.
fn echo_id(input: &Value, field: &str) -> Value {
    input.get(field).cloned().unwrap_or_else(|| Value::from(0))
}

/// Build the static prediction for `kind`.
pub fn prediction(kind: ModelKind, input: &Value) -> Prediction {
    match kind {
        ModelKind::Team => Prediction::Team(TeamPrediction {
            team_id: echo_id(input, "team_id"),
            win_probability: 0.65,
            run_expectancy: 4.2,
            projected_stats: BattingLine {
                batting_avg: 0.275,
                on_base_pct: 0.350,
                slugging_pct: 0.450,
            },
        }),
        ModelKind::Player => Prediction::Player(PlayerPrediction {
            player_id: echo_id(input, "player_id"),
            projection: PlayerProjection {
                batting_avg: 0.302,
                home_runs: 28,
                rbis: 95,
                war: 4.5,
            },
            comparable_players: vec![
                ComparablePlayer {
                    id: 123,
                    name: "Player A".to_string(),
                    similarity: 0.92,
                },
                ComparablePlayer {
                    id: 456,
                    name: "Player B".to_string(),
                    similarity: 0.87,
                },
            ],
        }),
        ModelKind::Game => Prediction::Game(GamePrediction {
            game_id: echo_id(input, "game_id"),
            home_win_probability: 0.58,
            predicted_score: Score { home: 5, away: 3 },
            key_factors: [
                ("home_field_advantage", 0.12),
                ("pitcher_matchup", 0.23),
                ("recent_performance", 0.18),
            ]
            .into_iter()
            .map(|(factor, impact)| KeyFactor {
                factor: factor.to_string(),
                impact,
            })
            .collect(),
        }),
        ModelKind::Generic => Prediction::Generic(GenericPrediction {
            predictions: [
                ("win_pct", 0.602),
                ("playoffs_pct", 0.78),
                ("championship_pct", 0.15),
            ]
            .into_iter()
            .map(|(category, value)| CategoryValue {
                category: category.to_string(),
                value,
            })
            .collect(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Training
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TrainingAccepted {
    pub status: String,
    pub model_type: String,
    pub job_id: String,
    pub estimated_completion: f64,
    pub message: String,
}

/// Acknowledge a training request made at `now` (unix seconds).
///
/// No job is created; the id is derived from the clock only.
pub fn training_accepted(model_type: &str, now: f64) -> TrainingAccepted {
    TrainingAccepted {
        status: "training_started".to_string(),
        model_type: model_type.to_string(),
        job_id: format!("train_{}", now.trunc() as i64),
        estimated_completion: now + TRAINING_ESTIMATE_SECS,
        message: "Training job has been queued".to_string(),
    }
}
