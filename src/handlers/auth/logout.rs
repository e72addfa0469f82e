// handlers/auth/logout.rs - POST /logout handler

use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::middleware::TOKEN_COOKIE;

/// POST /logout - Instruct the client to discard the auth cookie
///
/// Stateless: the server holds no session table, so a token issued before
/// logout remains cryptographically valid until its natural expiry. Known
/// limitation, documented rather than worked around.
pub async fn logout(jar: CookieJar) -> (CookieJar, &'static str) {
    let removal = Cookie::build((TOKEN_COOKIE, "")).path("/");
    (jar.remove(removal), "Logged out successfully")
}
