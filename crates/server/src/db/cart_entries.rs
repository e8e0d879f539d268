//! Cart entry repository for database operations.
//!
//! The table enforces: strictly positive quantity, one entry per
//! (user, item), and foreign keys to both sides with cascading delete. All of
//! these surface as `RepositoryError::Conflict`.

use sqlx::{PgPool, Postgres, QueryBuilder};

use restcart_core::{CartEntryId, ItemId, UserId};

use super::RepositoryError;
use crate::models::{CartEntry, CartEntryUpdate, NewCartEntry};

#[derive(sqlx::FromRow)]
struct CartEntryRow {
    id: CartEntryId,
    user_id: UserId,
    item_id: ItemId,
    quantity: i32,
}

impl From<CartEntryRow> for CartEntry {
    fn from(row: CartEntryRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            item_id: row.item_id,
            quantity: row.quantity,
        }
    }
}

/// Build the `UPDATE` statement for a partial cart entry update.
///
/// # Errors
///
/// Returns `RepositoryError::Validation` if no field is set.
pub fn update_query(
    id: CartEntryId,
    update: CartEntryUpdate,
) -> Result<QueryBuilder<'static, Postgres>, RepositoryError> {
    if update.is_empty() {
        return Err(RepositoryError::Validation(
            "at least one field required (userId, itemId, quantity)".to_owned(),
        ));
    }

    // A present `null` binds as NULL; the NOT NULL constraints reject it.
    let mut query = QueryBuilder::new("UPDATE shop.cart_entry SET ");
    {
        let mut set = query.separated(", ");
        if let Some(user_id) = update.user_id {
            set.push("user_id = ").push_bind_unseparated(user_id);
        }
        if let Some(item_id) = update.item_id {
            set.push("item_id = ").push_bind_unseparated(item_id);
        }
        if let Some(quantity) = update.quantity {
            set.push("quantity = ").push_bind_unseparated(quantity);
        }
    }
    query.push(" WHERE id = ").push_bind(id);

    Ok(query)
}

/// Repository for cart entry database operations.
pub struct CartEntryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartEntryRepository<'a> {
    /// Create a new cart entry repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a cart entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user or item does not exist,
    /// the pair already has an entry, or the quantity is not positive.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, entry: NewCartEntry) -> Result<CartEntryId, RepositoryError> {
        let id = sqlx::query_scalar::<_, CartEntryId>(
            r"
            INSERT INTO shop.cart_entry (user_id, item_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(entry.user_id)
        .bind(entry.item_id)
        .bind(entry.quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Get a cart entry by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CartEntryId) -> Result<Option<CartEntry>, RepositoryError> {
        let row = sqlx::query_as::<_, CartEntryRow>(
            r"
            SELECT id, user_id, item_id, quantity
            FROM shop.cart_entry
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(CartEntry::from))
    }

    /// List a user's cart entries in ID order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CartEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartEntryRow>(
            r"
            SELECT id, user_id, item_id, quantity
            FROM shop.cart_entry
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CartEntry::from).collect())
    }

    /// Apply a partial update.
    ///
    /// # Returns
    ///
    /// The number of updated rows: `0` if the entry does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if `update` sets no field.
    /// Returns `RepositoryError::Conflict` if the new user/item does not exist,
    /// the new pair collides with another entry, or the quantity is not positive.
    pub async fn update(
        &self,
        id: CartEntryId,
        update: CartEntryUpdate,
    ) -> Result<u64, RepositoryError> {
        let mut query = update_query(id, update)?;
        let result = query.build().execute(self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete a cart entry by ID.
    ///
    /// # Returns
    ///
    /// The number of deleted rows: `0` if the entry did not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CartEntryId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.cart_entry
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_update_query_quantity_only() {
        let update = CartEntryUpdate {
            quantity: Some(Some(4)),
            ..CartEntryUpdate::default()
        };
        let query = update_query(CartEntryId::new(3), update).unwrap();
        assert_eq!(
            query.sql(),
            "UPDATE shop.cart_entry SET quantity = $1 WHERE id = $2"
        );
    }

    #[test]
    fn test_update_query_reassign_item() {
        let update = CartEntryUpdate {
            item_id: Some(Some(ItemId::new(2))),
            ..CartEntryUpdate::default()
        };
        let query = update_query(CartEntryId::new(3), update).unwrap();
        assert_eq!(
            query.sql(),
            "UPDATE shop.cart_entry SET item_id = $1 WHERE id = $2"
        );
    }

    #[test]
    fn test_update_query_all_fields_keep_column_order() {
        let update = CartEntryUpdate {
            user_id: Some(Some(UserId::new(1))),
            item_id: Some(Some(ItemId::new(2))),
            quantity: Some(Some(5)),
        };
        let query = update_query(CartEntryId::new(3), update).unwrap();
        assert_eq!(
            query.sql(),
            "UPDATE shop.cart_entry SET user_id = $1, item_id = $2, quantity = $3 WHERE id = $4"
        );
    }

    #[test]
    fn test_update_query_writes_explicit_null() {
        let update = CartEntryUpdate {
            quantity: Some(None),
            ..CartEntryUpdate::default()
        };
        let query = update_query(CartEntryId::new(3), update).unwrap();
        assert_eq!(
            query.sql(),
            "UPDATE shop.cart_entry SET quantity = $1 WHERE id = $2"
        );
    }

    #[test]
    fn test_update_query_requires_a_field() {
        assert!(matches!(
            update_query(CartEntryId::new(1), CartEntryUpdate::default()),
            Err(RepositoryError::Validation(_))
        ));
    }
}
