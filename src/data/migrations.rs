use diesel::Connection;
use diesel_async::AsyncMysqlConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error("migration task panicked")]
    Join(#[from] tokio::task::JoinError),
}

type SyncConnection = AsyncConnectionWrapper<AsyncMysqlConnection>;

/// Applies every migration that has not run yet.
pub async fn run_pending(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();

    tokio::task::spawn_blocking(move || {
        let mut conn = SyncConnection::establish(&url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| MigrationError::Migration(e.to_string()))?;

        for version in &applied {
            tracing::info!("Applied migration {}", version);
        }

        Ok(applied.len())
    })
    .await?
}

/// Reverts every migration and applies them again, leaving empty tables.
pub async fn reset(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();

    tokio::task::spawn_blocking(move || {
        let mut conn = SyncConnection::establish(&url)?;
        let reverted = conn
            .revert_all_migrations(MIGRATIONS)
            .map_err(|e| MigrationError::Migration(e.to_string()))?;
        tracing::warn!("Reverted {} migrations", reverted.len());

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| MigrationError::Migration(e.to_string()))?;
        tracing::info!("Applied {} migrations", applied.len());

        Ok(())
    })
    .await?
}
