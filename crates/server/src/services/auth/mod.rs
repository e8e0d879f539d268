//! Authentication service.
//!
//! Registration hashes the password before it reaches the database, and the
//! access gate checks HTTP Basic credentials against the stored hash.
//!
//! Argon2 is deliberately slow, so hashing and verification run on the
//! blocking thread pool rather than on an async worker.

mod error;
mod password;

pub use error::AuthError;
pub use password::CredentialVerifier;

use sqlx::PgPool;

use restcart_core::{UserId, Username};

use crate::db::users::UserRepository;
use crate::db::{ConstraintKind, RepositoryError};

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    verifier: &'a CredentialVerifier,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, verifier: &'a CredentialVerifier) -> Self {
        Self {
            users: UserRepository::new(pool),
            verifier,
        }
    }

    /// Register a new user with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username is blank or malformed.
    /// Returns `AuthError::MissingPassword` if the password is empty.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<UserId, AuthError> {
        let username = Username::parse(username)?;
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let password_hash = self.hash_password(password).await?;

        self.users
            .create(&username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(ref v) if v.kind == ConstraintKind::Unique => {
                    AuthError::UserAlreadyExists
                }
                other => AuthError::Repository(other),
            })
    }

    /// Check a username/password pair.
    ///
    /// Returns `false` alike for an unknown username, a malformed username,
    /// and a wrong password; callers cannot tell them apart.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` only if the user lookup itself fails.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let stored_hash = match Username::parse(username) {
            Ok(username) => self
                .users
                .get_with_password_hash(&username)
                .await?
                .map(|(_, hash)| hash),
            Err(_) => None,
        };

        let verifier = self.verifier.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || verifier.verify_stored(&password, stored_hash.as_deref()))
            .await
            .map_err(|_| AuthError::PasswordHash)
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let verifier = self.verifier.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || verifier.hash(&password))
            .await
            .map_err(|_| AuthError::PasswordHash)?
    }
}
