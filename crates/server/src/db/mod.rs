//! Database operations for restcart `PostgreSQL`.
//!
//! # Schema: `shop`
//!
//! ## Tables
//!
//! - `user` - Registered users and their password hashes
//! - `item` - Catalog items with a price in euro cents
//! - `cart_entry` - (user, item, quantity) rows, unique per (user, item),
//!   cascading on delete of either side
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p restcart-cli -- migrate
//! ```
//!
//! # Errors
//!
//! Every repository returns [`RepositoryError`]. Driver errors are classified
//! exactly once, in the `From<sqlx::Error>` impl below, so a `?` inside a
//! repository already yields `Conflict` for constraint failures.

pub mod cart_entries;
pub mod items;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// The kind of storage constraint that rejected a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// `UNIQUE` / primary key.
    Unique,
    /// `REFERENCES`.
    ForeignKey,
    /// `CHECK`.
    Check,
    /// `NOT NULL`.
    NotNull,
}

impl ConstraintKind {
    /// Map a `PostgreSQL` SQLSTATE to a constraint kind.
    ///
    /// Returns `None` for codes outside the integrity-constraint class.
    #[must_use]
    pub fn from_sqlstate(code: &str) -> Option<Self> {
        match code {
            "23505" => Some(Self::Unique),
            "23503" => Some(Self::ForeignKey),
            "23514" => Some(Self::Check),
            "23502" => Some(Self::NotNull),
            _ => None,
        }
    }

    /// Human-readable name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign key",
            Self::Check => "check",
            Self::NotNull => "not null",
        }
    }
}

/// A statement rejected by a storage constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    /// Which kind of constraint fired.
    pub kind: ConstraintKind,
    /// Name of the constraint, when the driver reports it.
    pub constraint: Option<String>,
    /// Driver message.
    pub detail: String,
}

impl std::fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} constraint", self.kind.as_str())?;
        if let Some(name) = &self.constraint {
            write!(f, " {name}")?;
        }
        write!(f, ": {}", self.detail)
    }
}

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Unclassified database error from sqlx.
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// Uniqueness, foreign-key, not-null, or check constraint violation.
    #[error("constraint violation: {0}")]
    Conflict(ConstraintViolation),

    /// Caller-supplied data is insufficient; storage was not touched.
    #[error("validation error: {0}")]
    Validation(String),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && let Some(kind) = db_err.code().as_deref().and_then(ConstraintKind::from_sqlstate)
        {
            return Self::Conflict(ConstraintViolation {
                kind,
                constraint: db_err.constraint().map(str::to_owned),
                detail: db_err.message().to_owned(),
            });
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the history is inconsistent.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Delete every row from every table and restart identity counters.
///
/// Intended for test isolation only.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the statement fails.
pub async fn reset(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::query("TRUNCATE shop.cart_entry, shop.item, shop.user RESTART IDENTITY CASCADE")
        .execute(pool)
        .await?;
    Ok(())
}

/// Check database connectivity.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the database is unreachable.
pub async fn ping(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlstate_classification() {
        assert_eq!(
            ConstraintKind::from_sqlstate("23505"),
            Some(ConstraintKind::Unique)
        );
        assert_eq!(
            ConstraintKind::from_sqlstate("23503"),
            Some(ConstraintKind::ForeignKey)
        );
        assert_eq!(
            ConstraintKind::from_sqlstate("23514"),
            Some(ConstraintKind::Check)
        );
        assert_eq!(
            ConstraintKind::from_sqlstate("23502"),
            Some(ConstraintKind::NotNull)
        );
        // serialization failure, syntax error
        assert_eq!(ConstraintKind::from_sqlstate("40001"), None);
        assert_eq!(ConstraintKind::from_sqlstate("42601"), None);
    }

    #[test]
    fn test_non_database_errors_stay_internal() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(_)));

        let err = RepositoryError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Database(_)));
    }

    #[test]
    fn test_constraint_violation_display() {
        let violation = ConstraintViolation {
            kind: ConstraintKind::Unique,
            constraint: Some("item_name_key".to_owned()),
            detail: "duplicate key value violates unique constraint".to_owned(),
        };
        assert_eq!(
            violation.to_string(),
            "unique constraint item_name_key: duplicate key value violates unique constraint"
        );

        let violation = ConstraintViolation {
            kind: ConstraintKind::Check,
            constraint: None,
            detail: "bad".to_owned(),
        };
        assert_eq!(violation.to_string(), "check constraint: bad");
    }
}
