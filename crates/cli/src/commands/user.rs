//! User management commands.

use restcart_core::UserId;
use restcart_server::services::auth::{AuthService, CredentialVerifier};

use super::{CliError, connect};

/// Register a new user with the server's password hashing parameters.
///
/// # Errors
///
/// Returns an error if the username is invalid or taken, the password is
/// empty, or the database is unreachable.
pub async fn create(username: &str, password: &str) -> Result<UserId, CliError> {
    let (config, pool) = connect().await?;

    let hash = config.password_hash;
    let verifier = CredentialVerifier::new(hash.memory_kib, hash.iterations, hash.parallelism)?;

    let user_id = AuthService::new(&pool, &verifier)
        .register(username, password)
        .await?;

    tracing::info!(%user_id, %username, "User created");
    Ok(user_id)
}
