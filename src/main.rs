use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

mod config;
mod controllers;
mod db;
mod models;
mod routers;
mod seed;

use config::Config;
use db::{Database, MemoryDatabase, Storage};
use routers::make_app;
use seed::Datasets;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = Config::from_env()?;

    if config.uses_memory_storage() {
        info!("📊 Using in-memory storage, nothing will be persisted");
        return serve(MemoryDatabase::new(), &config).await;
    }

    let database = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    info!("📊 Connected to PostgreSQL database");

    database
        .migrate()
        .await
        .context("Database migrations failed")?;
    info!("📊 Database migrations completed");

    serve(database, &config).await
}

async fn serve<S: Storage>(store: S, config: &Config) -> anyhow::Result<()> {
    // Seeding finishes before the listener is bound, requests never see a partial reload.
    if config.reset_db {
        let datasets = Datasets::bundled()?;
        seed::reset_database(&store, datasets)
            .await
            .context("Failed to reset database")?;
    }

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    let app = make_app(store);

    info!("🎵 Media catalog listening on http://localhost:{}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
