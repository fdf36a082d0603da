use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;

use diamond_core::{CacheSettings, LoadedModel, MemoryCache, NullCache, PredictionService};
use diamond_server::auth::issue_token;
use diamond_server::cache::CacheBackend;
use diamond_server::routes;
use diamond_server::state::{AppState, AuthSettings};

pub const TEST_SECRET: &str = "test-jwt-secret";
pub const TEST_VERSION: &str = "9.9.9";

pub struct TestApp {
    pub router: Router,
}

fn build(token_required: bool, cache: CacheBackend, settings: CacheSettings) -> TestApp {
    let model = LoadedModel {
        name: "baseball-analytics-model".to_string(),
        version: TEST_VERSION.to_string(),
        weights_path: "/test/weights".to_string(),
        loaded: true,
    };
    let state = Arc::new(AppState {
        model,
        predictor: PredictionService::new(cache, settings, TEST_VERSION),
        auth: AuthSettings {
            token_required,
            jwt_secret: TEST_SECRET.to_string(),
        },
    });

    TestApp {
        router: routes::router(state),
    }
}

/// App with token checks and an in-memory cache.
pub fn setup_test_app() -> TestApp {
    let settings = CacheSettings {
        enabled: true,
        ttl: Duration::from_secs(60),
    };
    build(
        true,
        CacheBackend::Memory(MemoryCache::new(settings.ttl)),
        settings,
    )
}

/// App with token checks turned off and no cache.
pub fn setup_test_app_no_auth() -> TestApp {
    build(
        false,
        CacheBackend::Disabled(NullCache),
        CacheSettings::disabled(),
    )
}

/// App whose cache is enabled but has no reachable backend.
pub fn setup_test_app_cache_down() -> TestApp {
    let settings = CacheSettings {
        enabled: true,
        ttl: Duration::from_secs(60),
    };
    build(true, CacheBackend::Disabled(NullCache), settings)
}

pub fn bearer() -> String {
    let token = issue_token(TEST_SECRET, "tester", Some(Duration::from_secs(300))).unwrap();
    format!("Bearer {token}")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header("authorization", bearer())
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("authorization", bearer())
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
