//! Cart entry types.

use serde::{Deserialize, Serialize};

use restcart_core::{CartEntryId, ItemId, UserId};

/// One (user, item, quantity) row of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub id: CartEntryId,
    pub user_id: UserId,
    pub item_id: ItemId,
    /// Strictly positive; enforced by the storage check constraint.
    pub quantity: i32,
}

/// Fields required to create a cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartEntry {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub quantity: i32,
}

/// Partial update of a cart entry. Only fields present in the body are
/// written; an explicit `null` is written as NULL and rejected by storage.
///
/// `user_id` and `item_id` may be reassigned but must still reference
/// existing rows; the foreign keys reject anything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::option_option)]
pub struct CartEntryUpdate {
    #[serde(default, deserialize_with = "super::present")]
    pub user_id: Option<Option<UserId>>,
    #[serde(default, deserialize_with = "super::present")]
    pub item_id: Option<Option<ItemId>>,
    #[serde(default, deserialize_with = "super::present")]
    pub quantity: Option<Option<i32>>,
}

impl CartEntryUpdate {
    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.item_id.is_none() && self.quantity.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_update_fields_are_independent() {
        let update: CartEntryUpdate = serde_json::from_str(r#"{"quantity": 3}"#).unwrap();
        assert_eq!(
            update,
            CartEntryUpdate {
                quantity: Some(Some(3)),
                ..CartEntryUpdate::default()
            }
        );

        let update: CartEntryUpdate =
            serde_json::from_str(r#"{"userId": 2, "itemId": 5}"#).unwrap();
        assert_eq!(update.user_id, Some(Some(UserId::new(2))));
        assert_eq!(update.item_id, Some(Some(ItemId::new(5))));
        assert_eq!(update.quantity, None);
    }

    #[test]
    fn test_null_quantity_is_present() {
        let update: CartEntryUpdate = serde_json::from_str(r#"{"quantity": null}"#).unwrap();
        assert_eq!(update.quantity, Some(None));
        assert!(!update.is_empty());
    }

    #[test]
    fn test_empty_update() {
        let update: CartEntryUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());
    }
}
