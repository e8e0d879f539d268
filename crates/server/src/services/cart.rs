//! Cart aggregation.
//!
//! Joins a user's cart entries with the referenced items and prices every
//! line. Fetching and pricing are separate: [`CartService::user_cart`] does
//! the I/O, [`price_cart`] is pure.

use std::collections::{BTreeSet, HashMap};

use futures::future::try_join_all;
use sqlx::PgPool;
use thiserror::Error;

use restcart_core::{CartEntryId, EuroCents, ItemId, PriceError};

use crate::db::RepositoryError;
use crate::db::cart_entries::CartEntryRepository;
use crate::db::items::ItemRepository;
use crate::models::{CartEntry, CartLine, Item, User, UserCart};

/// Errors from cart aggregation.
#[derive(Debug, Error)]
pub enum CartError {
    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// A cart entry references an item that no longer exists.
    ///
    /// Cascading deletes make this impossible unless the data changed between
    /// the entry fetch and the item fetch.
    #[error("cart entry {cart_entry_id} references missing item {item_id}")]
    MissingItem {
        cart_entry_id: CartEntryId,
        item_id: ItemId,
    },

    /// A line or cart total does not fit in `i64` cents.
    #[error("cart total overflow: {0}")]
    Overflow(#[from] PriceError),
}

/// Price a user's cart.
///
/// Lines follow the order of `entries`. Every entry's item must be present in
/// `items`; a missing item fails the whole cart rather than being skipped.
///
/// # Errors
///
/// Returns `CartError::MissingItem` if an entry's item is not in `items`.
/// Returns `CartError::Overflow` if a line or the total overflows.
pub fn price_cart<S: std::hash::BuildHasher>(
    user: User,
    entries: Vec<CartEntry>,
    items: &HashMap<ItemId, Item, S>,
) -> Result<UserCart, CartError> {
    let mut cart = Vec::with_capacity(entries.len());

    for entry in entries {
        let item = items.get(&entry.item_id).ok_or(CartError::MissingItem {
            cart_entry_id: entry.id,
            item_id: entry.item_id,
        })?;

        let entry_price = item.price_euro_cent.times(entry.quantity)?;

        cart.push(CartLine {
            id: entry.id,
            name: item.name.clone(),
            quantity: entry.quantity,
            item_price_euro_cent: item.price_euro_cent,
            item_id: item.id,
            entry_price_euro_cent: entry_price,
        });
    }

    let total = EuroCents::try_sum(cart.iter().map(|line| line.entry_price_euro_cent))?;

    Ok(UserCart {
        user,
        total_price_euro_cent: total,
        cart,
    })
}

/// Cart aggregation service.
pub struct CartService<'a> {
    entries: CartEntryRepository<'a>,
    items: ItemRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            entries: CartEntryRepository::new(pool),
            items: ItemRepository::new(pool),
        }
    }

    /// Build the priced cart for an existing user.
    ///
    /// The caller is responsible for checking that the user exists. Items are
    /// fetched concurrently, one query per distinct item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if a query fails.
    /// Returns `CartError::MissingItem` if an entry's item vanished.
    /// Returns `CartError::Overflow` if the total overflows.
    pub async fn user_cart(&self, user: User) -> Result<UserCart, CartError> {
        let entries = self.entries.list_for_user(user.id).await?;

        let item_ids: BTreeSet<ItemId> = entries.iter().map(|e| e.item_id).collect();
        let fetched = try_join_all(item_ids.into_iter().map(|id| self.items.get_by_id(id))).await?;

        let items: HashMap<ItemId, Item> = fetched
            .into_iter()
            .flatten()
            .map(|item| (item.id, item))
            .collect();

        tracing::debug!(
            user_id = %user.id,
            entries = entries.len(),
            items = items.len(),
            "pricing cart"
        );

        price_cart(user, entries, &items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use restcart_core::{UserId, Username};

    use super::*;

    fn user() -> User {
        User {
            id: UserId::new(1),
            username: Username::parse("testuser").unwrap(),
        }
    }

    fn item(id: i32, name: &str, price: i64) -> Item {
        Item {
            id: ItemId::new(id),
            name: name.to_owned(),
            price_euro_cent: EuroCents::new(price),
        }
    }

    fn entry(id: i32, item_id: i32, quantity: i32) -> CartEntry {
        CartEntry {
            id: CartEntryId::new(id),
            user_id: UserId::new(1),
            item_id: ItemId::new(item_id),
            quantity,
        }
    }

    fn catalog(items: Vec<Item>) -> HashMap<ItemId, Item> {
        items.into_iter().map(|i| (i.id, i)).collect()
    }

    #[test]
    fn test_empty_cart() {
        let priced = price_cart(user(), vec![], &HashMap::new()).unwrap();
        assert_eq!(priced.total_price_euro_cent, EuroCents::ZERO);
        assert!(priced.cart.is_empty());
        assert_eq!(priced.user, user());
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let items = catalog(vec![item(1, "A", 100), item(2, "B", 150)]);
        let entries = vec![entry(10, 1, 2), entry(11, 2, 1)];

        let priced = price_cart(user(), entries, &items).unwrap();

        assert_eq!(priced.total_price_euro_cent, EuroCents::new(350));
        assert_eq!(priced.cart.len(), 2);
        for line in &priced.cart {
            assert_eq!(
                line.entry_price_euro_cent,
                line.item_price_euro_cent.times(line.quantity).unwrap()
            );
        }
    }

    #[test]
    fn test_lines_follow_entry_order() {
        let items = catalog(vec![item(1, "A", 100), item(2, "B", 150)]);
        let entries = vec![entry(11, 2, 1), entry(10, 1, 2)];

        let priced = price_cart(user(), entries, &items).unwrap();

        let ids: Vec<i32> = priced.cart.iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![11, 10]);
    }

    #[test]
    fn test_line_fields() {
        let items = catalog(vec![item(7, "Banana", 45)]);
        let priced = price_cart(user(), vec![entry(3, 7, 4)], &items).unwrap();

        assert_eq!(
            priced.cart,
            vec![CartLine {
                id: CartEntryId::new(3),
                name: "Banana".to_owned(),
                quantity: 4,
                item_price_euro_cent: EuroCents::new(45),
                item_id: ItemId::new(7),
                entry_price_euro_cent: EuroCents::new(180),
            }]
        );
    }

    #[test]
    fn test_missing_item_fails_fast() {
        let items = catalog(vec![item(1, "A", 100)]);
        let entries = vec![entry(10, 1, 1), entry(11, 99, 1)];

        let err = price_cart(user(), entries, &items).unwrap_err();

        assert!(matches!(
            err,
            CartError::MissingItem { cart_entry_id, item_id }
                if cart_entry_id == CartEntryId::new(11) && item_id == ItemId::new(99)
        ));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let items = catalog(vec![item(1, "Gold", i64::MAX / 2), item(2, "Silver", i64::MAX / 2)]);
        let entries = vec![entry(10, 1, 1), entry(11, 2, 2)];

        assert!(matches!(
            price_cart(user(), entries, &items),
            Err(CartError::Overflow(PriceError::Overflow))
        ));
    }

    #[test]
    fn test_json_shape() {
        let items = catalog(vec![item(1, "A", 100)]);
        let priced = price_cart(user(), vec![entry(5, 1, 2)], &items).unwrap();

        let json = serde_json::to_value(&priced).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "username": "testuser",
                "totalPriceEuroCent": 200,
                "cart": [{
                    "id": 5,
                    "name": "A",
                    "quantity": 2,
                    "itemPriceEuroCent": 100,
                    "itemId": 1,
                    "entryPriceEuroCent": 200
                }]
            })
        );
    }
}
