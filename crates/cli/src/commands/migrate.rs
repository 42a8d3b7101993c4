//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! larder-cli migrate
//! ```
//!
//! Runs the embedded migrations from `crates/web/migrations/` and then the
//! session store's own migration (the `tower_sessions` schema).

use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

use larder_web::db::MIGRATOR;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    tracing::info!("Running schema migrations...");
    MIGRATOR.run(&pool).await.map_err(MigrationError::from)?;

    tracing::info!("Running session store migration...");
    PostgresStore::new(pool.clone())
        .migrate()
        .await
        .map_err(MigrationError::from)?;

    tracing::info!("Migrations complete!");
    Ok(())
}
