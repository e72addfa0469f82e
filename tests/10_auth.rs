//! Authentication middleware behavior at the router level: requests are
//! rejected before any handler runs unless a valid token cookie is present.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::from_fn_with_state,
    routing::get,
    Extension, Router,
};
use chrono::Utc;
use serde_json::Map;
use tower::ServiceExt;

use alquest_api::auth::{issue_token, Claims};
use alquest_api::config::{
    AppConfig, DatabaseConfig, Environment, SecurityConfig, ServerConfig,
};
use alquest_api::middleware::{require_auth, AuthUser};

const SECRET: &str = "router-test-secret";

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        environment: Environment::Development,
        server: ServerConfig { port: 0 },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            connection_timeout_secs: 1,
        },
        security: SecurityConfig {
            jwt_secret: SECRET.to_string(),
            token_ttl_days: 30,
            cors_origins: vec![],
        },
    })
}

/// Handler only reachable through the auth gate; echoes the injected identity.
async fn whoami(Extension(user): Extension<AuthUser>) -> String {
    user.email
}

fn protected_app() -> Router {
    Router::new()
        .route("/protected", get(whoami))
        .layer(from_fn_with_state(test_config(), require_auth))
}

fn request_with_cookie(token: &str) -> Request<Body> {
    Request::builder()
        .uri("/protected")
        .header("cookie", format!("userToken={}", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn missing_cookie_is_unauthorized() {
    let response = protected_app()
        .oneshot(Request::builder().uri("/protected").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_reaches_handler_with_identity() {
    let claims = Claims::new("a@x.com", Map::new(), 30);
    let token = issue_token(&claims, SECRET).unwrap();

    let response = protected_app()
        .oneshot(request_with_cookie(&token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"a@x.com");
}

#[tokio::test]
async fn tampered_token_is_unauthorized() {
    let claims = Claims::new("a@x.com", Map::new(), 30);
    let mut token = issue_token(&claims, SECRET).unwrap();
    token.push_str("junk");

    let response = protected_app()
        .oneshot(request_with_cookie(&token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_secret_token_is_unauthorized() {
    let claims = Claims::new("a@x.com", Map::new(), 30);
    let token = issue_token(&claims, "some-other-secret").unwrap();

    let response = protected_app()
        .oneshot(request_with_cookie(&token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let now = Utc::now().timestamp();
    let claims = Claims {
        email: "a@x.com".to_string(),
        iat: now - 120,
        exp: now - 60,
        extra: Map::new(),
    };
    let token = issue_token(&claims, SECRET).unwrap();

    let response = protected_app()
        .oneshot(request_with_cookie(&token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
