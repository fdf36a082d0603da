use diamond_core::{LoadedModel, PredictionService};

use crate::cache::CacheBackend;

/// Token checking settings for the model endpoints.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub token_required: bool,
    pub jwt_secret: String,
}

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub model: LoadedModel,
    pub predictor: PredictionService<CacheBackend>,
    pub auth: AuthSettings,
}
