//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::auth::{AuthError, CredentialVerifier};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds the injected storage
/// handle; repositories borrow the pool per request and keep no state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    verifier: CredentialVerifier,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the password hashing parameters are invalid.
    pub fn new(config: &ServerConfig, pool: PgPool) -> Result<Self, AuthError> {
        let hash = &config.password_hash;
        let verifier = CredentialVerifier::new(hash.memory_kib, hash.iterations, hash.parallelism)?;
        Ok(Self::with_verifier(pool, verifier))
    }

    /// Create application state around an existing verifier.
    #[must_use]
    pub fn with_verifier(pool: PgPool, verifier: CredentialVerifier) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool, verifier }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the password verifier.
    #[must_use]
    pub fn verifier(&self) -> &CredentialVerifier {
        &self.inner.verifier
    }
}
