use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use diamond_server::auth::issue_token;

use crate::integration::common::{TEST_SECRET, json_body, setup_test_app, setup_test_app_no_auth};

fn get_with(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let builder = Request::get(uri);
    let builder = match authorization {
        Some(value) => builder.header("authorization", value),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn missing_token_returns_401() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(get_with("/models/team/info", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = json_body(response).await;
    assert_eq!(json["error"], "unauthorized");
    assert_eq!(json["message"], "Token is missing");
}

#[tokio::test]
async fn non_bearer_scheme_returns_401() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(get_with("/models/team/info", Some("Basic dXNlcjpwYXNz")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["message"], "Token is missing");
}

#[tokio::test]
async fn wrong_secret_returns_401() {
    let app = setup_test_app();
    let token = issue_token("some-other-secret", "tester", None).unwrap();

    let response = app
        .router
        .oneshot(get_with(
            "/models/team/metrics",
            Some(&format!("Bearer {token}")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["message"], "Token is invalid");
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(get_with("/models/team/info", Some("Bearer not-a-jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_is_accepted() {
    let app = setup_test_app();
    let token = issue_token(TEST_SECRET, "tester", None).unwrap();

    let response = app
        .router
        .oneshot(get_with(
            "/models/team/info",
            Some(&format!("Bearer {token}")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn every_model_route_requires_a_token() {
    let app = setup_test_app();

    for (method, uri) in [
        ("GET", "/models/team/info"),
        ("GET", "/models/team/metrics"),
        ("POST", "/models/team/predict"),
        ("POST", "/models/team/train"),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{method} {uri} should require a token"
        );
    }
}

#[tokio::test]
async fn health_does_not_require_a_token() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(get_with("/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn token_check_can_be_disabled() {
    let app = setup_test_app_no_auth();

    let response = app
        .router
        .oneshot(get_with("/models/game/info", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["name"], "baseball-analytics-game-model");
}
