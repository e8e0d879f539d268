//! Item repository for database operations.

use sqlx::{PgPool, Postgres, QueryBuilder};

use restcart_core::{EuroCents, ItemId};

use super::RepositoryError;
use crate::models::{Item, ItemUpdate, NewItem};

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: ItemId,
    name: String,
    price_euro_cent: EuroCents,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price_euro_cent: row.price_euro_cent,
        }
    }
}

/// Build the `UPDATE` statement for a partial item update.
///
/// Only fields set in `update` appear in the `SET` list.
///
/// # Errors
///
/// Returns `RepositoryError::Validation` if no field is set.
pub fn update_query(
    id: ItemId,
    update: ItemUpdate,
) -> Result<QueryBuilder<'static, Postgres>, RepositoryError> {
    if update.is_empty() {
        return Err(RepositoryError::Validation(
            "at least one field required (name, priceEuroCent)".to_owned(),
        ));
    }

    // A present `null` binds as NULL; the NOT NULL constraints reject it.
    let mut query = QueryBuilder::new("UPDATE shop.item SET ");
    {
        let mut set = query.separated(", ");
        if let Some(name) = update.name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(price) = update.price_euro_cent {
            set.push("price_euro_cent = ").push_bind_unseparated(price);
        }
    }
    query.push(" WHERE id = ").push_bind(id);

    Ok(query)
}

/// Repository for item database operations.
pub struct ItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is taken, empty, or the
    /// price is negative.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, item: &NewItem) -> Result<ItemId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ItemId>(
            r"
            INSERT INTO shop.item (name, price_euro_cent)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(&item.name)
        .bind(item.price_euro_cent)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Get an item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, name, price_euro_cent
            FROM shop.item
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    /// List all items in ID order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, name, price_euro_cent
            FROM shop.item
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Apply a partial update.
    ///
    /// # Returns
    ///
    /// The number of updated rows: `0` if the item does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if `update` sets no field.
    /// Returns `RepositoryError::Conflict` on a duplicate or empty name or a
    /// negative price.
    pub async fn update(&self, id: ItemId, update: ItemUpdate) -> Result<u64, RepositoryError> {
        let mut query = update_query(id, update)?;
        let result = query.build().execute(self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete an item by ID. Cart entries referencing it are removed by cascade.
    ///
    /// # Returns
    ///
    /// The number of deleted rows: `0` if the item did not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ItemId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.item
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
    fn test_update_query_all_fields() {
        let update = ItemUpdate {
            name: Some(Some("X".to_owned())),
            price_euro_cent: Some(Some(EuroCents::new(150))),
        };
        let query = update_query(ItemId::new(1), update).unwrap();
        assert_eq!(
            query.sql(),
            "UPDATE shop.item SET name = $1, price_euro_cent = $2 WHERE id = $3"
        );
    }

    #[test]
    fn test_update_query_only_price() {
        let update = ItemUpdate {
            price_euro_cent: Some(Some(EuroCents::new(150))),
            ..ItemUpdate::default()
        };
        let query = update_query(ItemId::new(1), update).unwrap();
        assert_eq!(
            query.sql(),
            "UPDATE shop.item SET price_euro_cent = $1 WHERE id = $2"
        );
    }

    #[test]
    fn test_update_query_only_name() {
        let update = ItemUpdate {
            name: Some(Some("renamed".to_owned())),
            ..ItemUpdate::default()
        };
        let query = update_query(ItemId::new(9), update).unwrap();
        assert_eq!(query.sql(), "UPDATE shop.item SET name = $1 WHERE id = $2");
    }

    #[test]
    fn test_update_query_writes_explicit_null() {
        let update = ItemUpdate {
            name: Some(None),
            ..ItemUpdate::default()
        };
        let query = update_query(ItemId::new(2), update).unwrap();
        assert_eq!(query.sql(), "UPDATE shop.item SET name = $1 WHERE id = $2");
    }

    #[test]
    fn test_update_query_requires_a_field() {
        assert!(matches!(
            update_query(ItemId::new(1), ItemUpdate::default()),
            Err(RepositoryError::Validation(_))
        ));
    }
}
