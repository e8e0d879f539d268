//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during registration and authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] restcart_core::UsernameError),

    /// Password missing or empty.
    #[error("password required")]
    MissingPassword,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Invalid hashing parameters.
    #[error("invalid password hash parameters: {0}")]
    HashParams(argon2::Error),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
