use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use diamond_core::{LoadedModel, PredictionService};
use diamond_server::cache::CacheBackend;
use diamond_server::config::ServerConfig;
use diamond_server::{logging, routes};
use diamond_server::state::{AppState, AuthSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // RUST_LOG wins; otherwise LOG_LEVEL (e.g. DEBUG) sets our crates' level.
    let raw_level = std::env::var("LOG_LEVEL").ok();
    let level = raw_level.as_deref().and_then(logging::level_directive);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging::default_filter(level.unwrap_or("info")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    if let (Some(raw), None) = (&raw_level, level) {
        tracing::warn!(level = %raw, "Unknown LOG_LEVEL, using info");
    }

    let config = ServerConfig::from_env()?;
    if config.token_required && config.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set; tokens are checked against the default secret");
    }

    let model = LoadedModel::load(
        &config.model_version,
        &config.weights_path,
        config.model_load_delay,
    )
    .await;

    let cache = CacheBackend::from_config(&config.cache).await;
    let predictor = PredictionService::new(cache, config.cache.settings(), &config.model_version);

    let state = Arc::new(AppState {
        model,
        predictor,
        auth: AuthSettings {
            token_required: config.token_required,
            jwt_secret: config.jwt_secret.clone(),
        },
    });

    let app = routes::router(state)
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting model API server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
