use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod ownership;

/// Identity claim set embedded in every token.
///
/// The caller supplies an arbitrary claim mapping at login; only `email` is
/// required. Everything else rides along untouched in `extra` so the claim
/// survives a round trip through the token unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Build a claim set expiring `ttl_days` from now. Reserved fields
    /// (`email`, `iat`, `exp`) in the caller-supplied mapping are ignored;
    /// issuance always stamps its own timestamps.
    pub fn new(email: impl Into<String>, extra: Map<String, Value>, ttl_days: i64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::days(ttl_days)).timestamp();

        let extra = extra
            .into_iter()
            .filter(|(k, _)| !matches!(k.as_str(), "email" | "iat" | "exp"))
            .collect();

        Self {
            email: email.into(),
            iat: now.timestamp(),
            exp,
            extra,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT signing secret is missing or empty")]
    MissingSecret,

    #[error("Token generation failed: {0}")]
    Encoding(String),
}

/// Outcome of token verification. A tagged result instead of an error type:
/// the route layer pattern-matches this into the right HTTP status and no
/// raw jsonwebtoken error ever escapes past this module.
#[derive(Debug)]
pub enum TokenVerification {
    Valid(Claims),
    Expired,
    Malformed,
}

/// Sign a claim set into a token string.
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &key).map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verify signature and expiry of a token against the shared secret.
///
/// Pure synchronous check: secret + current time in, tagged verdict out.
pub fn verify_token(token: &str, secret: &str) -> TokenVerification {
    let key = DecodingKey::from_secret(secret.as_bytes());

    // Zero leeway: a token is invalid strictly after its expiry instant.
    let mut validation = Validation::default();
    validation.leeway = 0;

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => TokenVerification::Valid(data.claims),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenVerification::Expired,
            _ => TokenVerification::Malformed,
        },
    }
}
