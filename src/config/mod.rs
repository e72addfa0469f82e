use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Errors raised while building [`AppConfig`]. All of these are fatal at
/// startup: the process must not begin serving without a usable config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("JWT signing secret is empty")]
    EmptySecret,

    #[error("Invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared secret used to sign and verify tokens. Confidential.
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Token lifetime in days. Defaults to 30.
    pub token_ttl_days: i64,
    /// Origins allowed to send credentialed (cookie) requests.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Build the process-wide configuration from the environment.
    ///
    /// Initialized once at startup and passed read-only to the components
    /// that need it; there is no teardown beyond process exit.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let token_ttl_days = match env::var("TOKEN_TTL_DAYS") {
            Ok(v) => v
                .parse::<i64>()
                .ok()
                .filter(|d| *d > 0)
                .ok_or(ConfigError::InvalidVar {
                    var: "TOKEN_TTL_DAYS",
                    value: v,
                })?,
            Err(_) => 30,
        };

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3000);

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(v) => v.split(',').map(|s| s.trim().to_string()).collect(),
            Err(_) => vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
        };

        Ok(Self {
            environment,
            server: ServerConfig { port },
            database: DatabaseConfig {
                url: database_url,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                connection_timeout_secs: env::var("DATABASE_CONNECTION_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            },
            security: SecurityConfig {
                jwt_secret,
                token_ttl_days,
                cors_origins,
            },
        })
    }
}
