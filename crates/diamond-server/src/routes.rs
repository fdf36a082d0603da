use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use diamond_core::{AppError, catalog, unix_timestamp};

use crate::auth::require_token;
use crate::dto::{
    DetailedHealthResponse, DetailedModelStatus, HealthResponse, ModelInfoResponse,
    ModelMetricsResponse, ModelStatus, PredictRequest, TrainingResponse,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;
use crate::system;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let models = Router::new()
        .route("/models/{model_type}/info", get(model_info))
        .route("/models/{model_type}/metrics", get(model_metrics))
        .route("/models/{model_type}/predict", post(predict))
        .route("/models/{model_type}/train", post(train))
        .layer(middleware::from_fn_with_state(state.clone(), require_token));

    let public = Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(health_detailed))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(models).with_state(state)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    axum::Json(HealthResponse {
        status: "healthy",
        model: ModelStatus {
            version: state.model.version.clone(),
            loaded: state.model.loaded,
        },
        timestamp: unix_timestamp(),
    })
}

#[utoipa::path(
    get,
    path = "/health/detailed",
    responses(
        (status = 200, description = "Service, host, and cache status", body = DetailedHealthResponse),
    ),
    tag = "system"
)]
pub async fn health_detailed(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (system, cache) = tokio::join!(system::snapshot(), state.predictor.cache_status());

    axum::Json(DetailedHealthResponse {
        status: "healthy",
        model: DetailedModelStatus {
            version: state.model.version.clone(),
            loaded: state.model.loaded,
            weights_path: state.model.weights_path.clone(),
        },
        system,
        cache: cache.into(),
        timestamp: unix_timestamp(),
    })
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/models/{model_type}/info",
    params(
        ("model_type" = String, Path, description = "Model type, e.g. team, player, game")
    ),
    responses(
        (status = 200, description = "Model metadata", body = ModelInfoResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "models"
)]
pub async fn model_info(
    State(state): State<Arc<AppState>>,
    Path(model_type): Path<String>,
) -> impl IntoResponse {
    let info = catalog::model_info(&model_type, &state.model.version);
    axum::Json(ModelInfoResponse::new(info, unix_timestamp()))
}

#[utoipa::path(
    get,
    path = "/models/{model_type}/metrics",
    params(
        ("model_type" = String, Path, description = "Model type")
    ),
    responses(
        (status = 200, description = "Evaluation metrics", body = ModelMetricsResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "models"
)]
pub async fn model_metrics(
    State(state): State<Arc<AppState>>,
    Path(_model_type): Path<String>,
) -> impl IntoResponse {
    let metrics = catalog::model_metrics(&state.model.version);
    axum::Json(ModelMetricsResponse::new(metrics, unix_timestamp()))
}

#[utoipa::path(
    post,
    path = "/models/{model_type}/predict",
    params(
        ("model_type" = String, Path, description = "Model type; team, player and game have dedicated payloads")
    ),
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Prediction payload; shape depends on the model type"),
        (status = 400, description = "Missing or invalid input", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "models"
)]
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Path(model_type): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::InvalidInput("No input data provided".into()).into());
    }

    let input: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidInput(format!("Invalid JSON body: {e}")))?;

    let result = state.predictor.predict(&model_type, &input).await?;
    Ok(axum::Json(result))
}

#[utoipa::path(
    post,
    path = "/models/{model_type}/train",
    params(
        ("model_type" = String, Path, description = "Model type")
    ),
    responses(
        (status = 200, description = "Training acknowledged; no job actually runs", body = TrainingResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "models"
)]
pub async fn train(Path(model_type): Path<String>) -> impl IntoResponse {
    tracing::info!(%model_type, "Training requested");
    let ack = catalog::training_accepted(&model_type, unix_timestamp());
    axum::Json(TrainingResponse::from(ack))
}
