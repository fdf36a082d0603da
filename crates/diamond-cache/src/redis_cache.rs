use std::time::Duration;

use diamond_core::{AppError, PredictionCache};
use redis::AsyncCommands;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};

/// Upper bound on a single Redis round trip.
const RESPONSE_TIMEOUT: Duration = Duration::from_millis(500);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const CONNECT_RETRIES: usize = 2;

/// [`PredictionCache`] backed by a Redis server.
///
/// Uses a [`ConnectionManager`]: a call that hits a dropped connection fails,
/// and the manager reconnects so later calls go through once Redis is back.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Open a connection to `url` and verify it with `PING`.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(url)
            .map_err(|e| AppError::CacheError(format!("Invalid Redis URL: {e}")))?;
        let config = ConnectionManagerConfig::new()
            .set_response_timeout(RESPONSE_TIMEOUT)
            .set_connection_timeout(CONNECT_TIMEOUT)
            .set_number_of_retries(CONNECT_RETRIES);
        let conn = client
            .get_connection_manager_with_config(config)
            .await
            .map_err(|e| AppError::CacheError(format!("Failed to connect: {e}")))?;

        let cache = Self { conn };
        cache.ping().await?;
        tracing::info!(addr = %server_addr(&client), "Connected to Redis");
        Ok(cache)
    }
}

/// `host:port` of the server, without credentials or database index.
fn server_addr(client: &redis::Client) -> String {
    client.get_connection_info().addr.to_string()
}

impl PredictionCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .map_err(|e| AppError::CacheError(format!("GET {key} failed: {e}")))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        // SETEX rejects a zero expiry.
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(|e| AppError::CacheError(format!("SETEX {key} failed: {e}")))
    }

    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| AppError::CacheError(format!("PING failed: {e}")))
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
