//! Domain models for restcart.
//!
//! These are validated domain objects, separate from the database row types
//! in [`crate::db`]. JSON field names are camelCase to match the REST API.

use serde::{Deserialize, Deserializer};

pub mod cart;
pub mod cart_entry;
pub mod item;
pub mod user;

pub use cart::{CartLine, UserCart};
pub use cart_entry::{CartEntry, CartEntryUpdate, NewCartEntry};
pub use item::{Item, ItemUpdate, NewItem};
pub use user::{AuthenticatedUser, User};

/// Deserialize a field that was present in the body, keeping an explicit
/// `null` as `Some(None)`. Pair with `#[serde(default)]` so an absent field
/// stays `None`.
#[allow(clippy::option_option)]
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
