use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};

use diamond_cache::RedisCache;

/// Spins up a Redis container and returns a connected cache.
///
/// The `ContainerAsync` must be kept in scope for the test duration.
/// Dropping it stops the container.
pub async fn setup_test_redis() -> (RedisCache, String, ContainerAsync<GenericImage>) {
    let container = GenericImage::new("redis", "7-alpine")
        .with_exposed_port(ContainerPort::Tcp(6379))
        .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
        .start()
        .await
        .expect("Failed to start Redis container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(6379)
        .await
        .expect("Failed to get port");

    let url = format!("redis://{host}:{port}");
    let cache = retry_connect(&url).await;

    (cache, url, container)
}

async fn retry_connect(url: &str) -> RedisCache {
    for _ in 0..30 {
        if let Ok(cache) = RedisCache::connect(url).await {
            return cache;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    panic!("Failed to connect to test Redis");
}

/// Kills every client connection on the server except the one issuing the command.
pub async fn drop_client_connections(url: &str) {
    let client = redis::Client::open(url).expect("Invalid Redis URL");
    let mut admin = client
        .get_multiplexed_async_connection()
        .await
        .expect("Failed to open admin connection");
    redis::cmd("CLIENT")
        .arg("KILL")
        .arg("TYPE")
        .arg("normal")
        .arg("SKIPME")
        .arg("yes")
        .query_async::<i64>(&mut admin)
        .await
        .expect("CLIENT KILL failed");
}
