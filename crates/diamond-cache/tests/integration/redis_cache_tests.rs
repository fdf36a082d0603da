use std::time::Duration;

use diamond_cache::RedisCache;
use diamond_core::{CacheSettings, PredictionCache, PredictionService, cache_key};

use crate::integration::common::{drop_client_connections, setup_test_redis};

#[tokio::test]
async fn get_missing_key_returns_none() {
    let (cache, _url, _container) = setup_test_redis().await;

    assert_eq!(cache.get("model:team:predict:missing").await.unwrap(), None);
}

#[tokio::test]
async fn set_then_get_round_trips() {
    let (cache, _url, _container) = setup_test_redis().await;

    cache
        .set("model:team:predict:abc", r#"{"team_id":1}"#, Duration::from_secs(60))
        .await
        .unwrap();

    let value = cache.get("model:team:predict:abc").await.unwrap();
    assert_eq!(value.as_deref(), Some(r#"{"team_id":1}"#));
}

#[tokio::test]
async fn entries_expire() {
    let (cache, _url, _container) = setup_test_redis().await;

    cache
        .set("short-lived", "v", Duration::from_secs(1))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2100)).await;

    assert_eq!(cache.get("short-lived").await.unwrap(), None);
}

#[tokio::test]
async fn ping_and_backend_name() {
    let (cache, _url, _container) = setup_test_redis().await;

    assert!(cache.ping().await.is_ok());
    assert_eq!(cache.backend(), "redis");
}

#[tokio::test]
async fn second_prediction_is_served_from_redis() {
    let (cache, url, _container) = setup_test_redis().await;
    let settings = CacheSettings {
        enabled: true,
        ttl: Duration::from_secs(60),
    };
    let service = PredictionService::new(cache, settings, "1.0.0");
    let input = serde_json::json!({"team_id": 42});

    let first = service.predict("team", &input).await.unwrap();

    // A fresh connection sees the stored entry.
    let other = RedisCache::connect(&url).await.unwrap();
    let stored = other
        .get(&cache_key("team", &input))
        .await
        .unwrap()
        .expect("prediction should have been cached");
    assert_eq!(stored, first.to_string());

    let second = service.predict("team", &input).await.unwrap();
    let expected: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(second, expected);
}

#[tokio::test]
async fn recovers_after_connection_is_dropped() {
    let (cache, url, _container) = setup_test_redis().await;
    cache.ping().await.unwrap();

    drop_client_connections(&url).await;

    // The first call may see the dead socket; the cache reconnects after that.
    let mut recovered = false;
    for _ in 0..20 {
        if cache.ping().await.is_ok() {
            recovered = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(recovered, "cache never reconnected");

    cache
        .set("after-reconnect", "v", Duration::from_secs(60))
        .await
        .unwrap();
    assert_eq!(
        cache.get("after-reconnect").await.unwrap().as_deref(),
        Some("v")
    );
}

#[tokio::test]
async fn connect_to_unreachable_server_fails() {
    let err = RedisCache::connect("redis://127.0.0.1:1").await;
    assert!(err.is_err());
}
