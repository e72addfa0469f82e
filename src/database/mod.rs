use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

pub mod models;
pub mod queries;
pub mod recommendations;

pub use queries::QueryRepository;
pub use recommendations::RecommendationRepository;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Open the process-wide connection pool. Called once at startup; the pool
/// is read-only shared state from then on.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect(&config.url)
        .await?;

    info!("Database connected");
    Ok(pool)
}

/// Create the two collections if they do not exist yet. Idempotent, so it
/// runs unconditionally at startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS queries (
            id UUID PRIMARY KEY,
            product_name TEXT NOT NULL,
            product_brand TEXT,
            product_image TEXT,
            title TEXT NOT NULL,
            details TEXT,
            email TEXT NOT NULL,
            recommendation_count BIGINT NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recommendations (
            id UUID PRIMARY KEY,
            query_id UUID NOT NULL,
            title TEXT NOT NULL,
            product_name TEXT NOT NULL,
            product_image TEXT,
            reason TEXT,
            recommender_email TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Pings the pool to ensure connectivity
pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
