//! Catalog item types.

use serde::{Deserialize, Serialize};

use restcart_core::{EuroCents, ItemId};

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique item ID.
    pub id: ItemId,
    /// Unique, non-empty display name.
    pub name: String,
    /// Unit price.
    pub price_euro_cent: EuroCents,
}

/// Fields required to create an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub price_euro_cent: EuroCents,
}

/// Partial update of an item. Only fields present in the body are written.
///
/// An explicit `null` is `Some(None)` and is written as NULL, which the
/// NOT NULL constraints reject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::option_option)]
pub struct ItemUpdate {
    #[serde(default, deserialize_with = "super::present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::present")]
    pub price_euro_cent: Option<Option<EuroCents>>,
}

impl ItemUpdate {
    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price_euro_cent.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_update_from_json_only_sets_present_fields() {
        let update: ItemUpdate = serde_json::from_str(r#"{"priceEuroCent": 150}"#).unwrap();
        assert_eq!(update.name, None);
        assert_eq!(update.price_euro_cent, Some(Some(EuroCents::new(150))));
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_keeps_explicit_null() {
        let update: ItemUpdate = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(update.name, Some(None));
        assert_eq!(update.price_euro_cent, None);
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_ignores_unknown_fields() {
        let update: ItemUpdate = serde_json::from_str(r#"{"colour": "red"}"#).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item {
            id: ItemId::new(1),
            name: "X".to_owned(),
            price_euro_cent: EuroCents::new(100),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "X", "priceEuroCent": 100})
        );
    }
}
