//! CLI subcommands.

pub mod migrate;
pub mod recipes;
pub mod user;

use larder_web::config::LarderConfig;
use larder_web::db;
use sqlx::PgPool;

/// Load configuration and connect, as the web service does.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = LarderConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url, config.db_max_connections).await?;
    Ok(pool)
}
