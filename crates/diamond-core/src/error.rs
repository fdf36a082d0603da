use thiserror::Error;

/// Application-wide error types for Diamond.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request carried no usable input.
    #[error("{0}")]
    InvalidInput(String),

    /// Bearer token missing or rejected.
    #[error("{0}")]
    Unauthorized(String),

    /// Cache backend call failed.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if the error came from the cache layer.
    ///
    /// Cache failures never fail a request; callers log them and continue
    /// as if the lookup missed.
    pub fn is_cache_failure(&self) -> bool {
        matches!(self, AppError::CacheError(_))
    }
}
