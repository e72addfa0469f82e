use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::auth::{verify_token, Claims, TokenVerification};
use crate::config::AppConfig;
use crate::error::ApiError;

/// Name of the cookie carrying the auth token.
pub const TOKEN_COOKIE: &str = "userToken";

/// Authenticated user context extracted from the token cookie
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
    pub claims: Map<String, Value>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
            claims: claims.extra,
        }
    }
}

/// Authentication middleware for protected routes.
///
/// Reads the token from the `userToken` cookie and verifies signature and
/// expiry against the shared secret. On success the decoded identity is
/// injected into request extensions; on any failure the request is rejected
/// with 401 before the handler runs, so storage is never touched for an
/// unauthenticated request.
pub async fn require_auth(
    State(config): State<Arc<AppConfig>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ApiError::unauthorized("authentication required"))?;

    match verify_token(&token, &config.security.jwt_secret) {
        TokenVerification::Valid(claims) => {
            request.extensions_mut().insert(AuthUser::from(claims));
            Ok(next.run(request).await)
        }
        TokenVerification::Expired => Err(ApiError::unauthorized("token expired")),
        TokenVerification::Malformed => Err(ApiError::unauthorized("invalid token")),
    }
}
