use std::time::Duration;

use diamond_core::{AppError, CacheSettings};

const DEFAULT_TTL_SECS: u64 = 3600;

/// Configuration for prediction caching.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl: Duration,
    /// Redis connection URL. `None` selects the in-process cache.
    pub redis_url: Option<String>,
}

impl CacheConfig {
    /// Read configuration from environment variables.
    ///
    /// - `CACHE_ENABLED` (optional, defaults to `true`)
    /// - `CACHE_TTL` (optional, seconds, defaults to 3600)
    /// - `REDIS_URL` (optional)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("CACHE_ENABLED")
            .map(|raw| raw.eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        let ttl_secs = match lookup("CACHE_TTL") {
            None => DEFAULT_TTL_SECS,
            Some(raw) => {
                let parsed: u64 = raw.parse().map_err(|_| {
                    AppError::ConfigError(format!(
                        "Invalid CACHE_TTL '{raw}': must be a positive integer"
                    ))
                })?;
                if parsed == 0 {
                    return Err(AppError::ConfigError(
                        "CACHE_TTL must be at least 1 second".into(),
                    ));
                }
                parsed
            }
        };

        let redis_url = lookup("REDIS_URL").filter(|url| !url.trim().is_empty());

        Ok(Self {
            enabled,
            ttl: Duration::from_secs(ttl_secs),
            redis_url,
        })
    }

    pub fn settings(&self) -> CacheSettings {
        CacheSettings {
            enabled: self.enabled,
            ttl: self.ttl,
        }
    }
}
