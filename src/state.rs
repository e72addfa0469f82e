use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state: config and database pool, both built once at
/// startup and read-only thereafter.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: PgPool,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
