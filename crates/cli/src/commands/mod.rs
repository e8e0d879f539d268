//! CLI command implementations.

pub mod migrate;
pub mod reset;
pub mod user;

use restcart_server::config::{ConfigError, ServerConfig};
use restcart_server::db::{self, RepositoryError};
use restcart_server::services::auth::AuthError;
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Refusing to reset without --force")]
    NotConfirmed,
}

/// Load configuration and open a small pool.
async fn connect() -> Result<(ServerConfig, PgPool), CliError> {
    let config = ServerConfig::from_env()?;
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url, 2).await?;
    Ok((config, pool))
}
