use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use diamond_core::AppError;

use crate::dto::ErrorResponse;
use crate::state::AppState;

/// Claims carried by API tokens. All are optional; `exp` is enforced only
/// when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Extract the token from an `Authorization` header value.
///
/// Only the `Bearer` scheme is accepted; the token is the first
/// space-separated word after it.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .and_then(|rest| rest.split(' ').next())
        .filter(|token| !token.is_empty())
}

/// Verify an HS256 token signed with `secret`.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = true;
    validation.validate_aud = false;

    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(e.to_string()))
}

/// Sign an HS256 token for `subject`, valid for `ttl` (or forever if `None`).
pub fn issue_token(secret: &str, subject: &str, ttl: Option<Duration>) -> Result<String, AppError> {
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    let claims = Claims {
        sub: Some(subject.to_string()),
        iat: Some(now),
        exp: ttl.map(|ttl| now.saturating_add(ttl.as_secs())),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Generic(format!("Failed to sign token: {e}")))
}

/// Middleware that validates `Authorization: Bearer <jwt>` against the configured secret.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    if !state.auth.token_required {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    let Some(token) = token else {
        return unauthorized("Token is missing");
    };

    if let Err(e) = verify_token(&state.auth.jwt_secret, token) {
        tracing::error!(error = %e, "Token validation error");
        return unauthorized("Token is invalid");
    }

    next.run(request).await
}

fn unauthorized(message: &str) -> Response {
    let body = ErrorResponse {
        error: "unauthorized".to_string(),
        message: message.to_string(),
    };
    (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
}
