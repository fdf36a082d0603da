use std::time::Duration;

use diamond_cache::CacheConfig;
use diamond_core::AppError;

pub const DEFAULT_JWT_SECRET: &str = "default_jwt_secret";

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    /// When false, model endpoints accept requests without a token.
    pub token_required: bool,
    pub model_version: String,
    pub weights_path: String,
    /// Simulated model load time.
    pub model_load_delay: Duration,
    pub max_body_bytes: usize,
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `PORT` (default 5000)
    /// - `JWT_SECRET` (default `default_jwt_secret`)
    /// - `API_TOKEN_REQUIRED` (default `true`)
    /// - `MODEL_VERSION` (default `1.0.0`)
    /// - `MODEL_WEIGHTS_PATH` (default `/data/weights`)
    /// - `MODEL_LOAD_DELAY_MS` (default 1000)
    /// - `MAX_BODY_BYTES` (default 1 MiB)
    /// - `CACHE_ENABLED`, `CACHE_TTL`, `REDIS_URL`, see [`CacheConfig`]
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", 5000u16)?;
        let load_delay_ms = parse_or(&lookup, "MODEL_LOAD_DELAY_MS", 1000u64)?;
        let max_body_bytes = parse_or(&lookup, "MAX_BODY_BYTES", 1024 * 1024usize)?;
        if max_body_bytes == 0 {
            return Err(AppError::ConfigError(
                "MAX_BODY_BYTES must be at least 1".into(),
            ));
        }

        Ok(Self {
            port,
            jwt_secret: lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            token_required: lookup("API_TOKEN_REQUIRED")
                .map(|raw| raw.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
            model_version: lookup("MODEL_VERSION").unwrap_or_else(|| "1.0.0".to_string()),
            weights_path: lookup("MODEL_WEIGHTS_PATH")
                .unwrap_or_else(|| "/data/weights".to_string()),
            model_load_delay: Duration::from_millis(load_delay_ms),
            max_body_bytes,
            cache: CacheConfig::from_lookup(&lookup)?,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::ConfigError(format!("Invalid {name} '{raw}': must be a non-negative integer"))
        }),
    }
}
