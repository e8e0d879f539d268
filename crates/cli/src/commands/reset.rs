//! Reset command: truncate every table and restart identity counters.

use restcart_server::db;

use super::{CliError, connect};

/// Delete all rows. Refuses to run unless `force` is set.
///
/// # Errors
///
/// Returns `CliError::NotConfirmed` without `force`, or an error if the
/// database is unreachable.
pub async fn run(force: bool) -> Result<(), CliError> {
    if !force {
        return Err(CliError::NotConfirmed);
    }

    let (_, pool) = connect().await?;
    db::reset(&pool).await?;

    tracing::warn!("All users, items, and cart entries deleted");
    Ok(())
}
