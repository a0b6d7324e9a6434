mod common;
mod config;
mod routes;
mod services;

mod calibration;
mod engineering;
mod inventory;
mod overhaul;
mod production;
mod quality_control;

use crate::config::Config;
use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config: Config = Config::from_env()?;

    let db: DatabaseConnection = Database::connect(config.db_url.as_str())
        .await
        .context("Could not connect to the database")?;
    db.ping().await.context("Database did not answer ping")?;
    tracing::info!("Connected to the database");

    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("DB migrations complete");

    tracing::info!(
        "Starting server {} ({} deployment) ...",
        config.app_name,
        config.deployment.to_uppercase()
    );

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let router = routes::build_router(&db, &config)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind {addr}"))?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
