use anyhow::Context;
use std::sync::Arc;

use alquest_api::{app, config::AppConfig, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // A missing or empty signing secret must abort startup, not surface later
    // as per-request failures.
    let config = Arc::new(AppConfig::from_env().context("invalid configuration")?);
    tracing::info!("Starting AlQuest API in {:?} mode", config.environment);

    let pool = database::connect(&config.database)
        .await
        .context("database connection failed")?;
    database::ensure_schema(&pool)
        .await
        .context("schema setup failed")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("AlQuest API listening on http://{}", bind_addr);

    let state = AppState { config, db: pool };
    axum::serve(listener, app(state)).await.context("server")?;

    Ok(())
}
