// handlers/auth/login.rs - POST /jwt handler

use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::auth::{issue_token, Claims};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::middleware::TOKEN_COOKIE;

/// POST /jwt - Issue a signed token for a caller-supplied identity claim
///
/// No credential verification happens here: trust is delegated entirely to
/// whatever authenticated the user upstream. The body is an arbitrary JSON
/// object that must include an `email`; the signed token is returned in the
/// body and also set as an HttpOnly cross-site cookie.
pub async fn login(
    State(config): State<Arc<AppConfig>>,
    jar: CookieJar,
    Json(claim): Json<Map<String, Value>>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let email = claim
        .get("email")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("identity claim must include an email"))?
        .to_string();

    let claims = Claims::new(email, claim, config.security.token_ttl_days);
    let token = issue_token(&claims, &config.security.jwt_secret)?;

    let cookie = Cookie::build((TOKEN_COOKIE, token.clone()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/");

    Ok((jar.add(cookie), Json(json!({ "token": token }))))
}
