//! User domain types.

use serde::Serialize;

use restcart_core::{UserId, Username};

/// A registered user (domain type).
///
/// The password hash is deliberately not part of this type; it only leaves
/// the database through [`crate::db::users::UserRepository::get_with_password_hash`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
}

/// The caller identity established by HTTP Basic authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Login name that passed the access gate.
    pub username: Username,
}
