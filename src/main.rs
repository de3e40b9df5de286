//! Glyms server: team-building events for companies.
//!
//! Main entry point that loads configuration, prepares the database, and
//! starts the HTTP server.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use glyms_core::config::AppConfig;
use glyms_database::{DatabasePool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("GLYMS_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env).context("Failed to load configuration")?;

    init_logging(&config);
    tracing::info!(env = %env, "Starting Glyms v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database)
        .await
        .context("Database connection failed")?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        run_migrations(db.pool()).await.context("Migration failed")?;
    }

    glyms_api::run_server(config, db).await.context("Server error")?;
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
