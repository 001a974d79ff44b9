//! # Item Repository
//!
//! Database operations for the sellable item catalog. The `unit_price_cents`
//! column read here is the only price source bill creation ever consults.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tillpoint_core::{Item, NewItem};

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists all items, ordered by name.
    pub async fn find_all(&self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, unit_price_cents, stock
            FROM items
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an item by its id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, unit_price_cents, stock
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Checks whether an item with the given id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM items WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found != 0)
    }

    /// Returns the current unit price in cents for an item, if it exists.
    pub async fn price_of(&self, id: i64) -> DbResult<Option<i64>> {
        let price: Option<i64> =
            sqlx::query_scalar("SELECT unit_price_cents FROM items WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(price)
    }

    /// Inserts a new item and returns it with its generated id.
    pub async fn insert(&self, new: &NewItem) -> DbResult<Item> {
        debug!(name = %new.name, "Inserting item");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO items (name, unit_price_cents, stock)
            VALUES (?1, ?2, ?3)
            RETURNING id
            "#,
        )
        .bind(&new.name)
        .bind(new.unit_price_cents)
        .bind(new.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(Item {
            id,
            name: new.name.clone(),
            unit_price_cents: new.unit_price_cents,
            stock: new.stock,
        })
    }

    /// Updates an existing item.
    pub async fn update(&self, id: i64, item: &NewItem) -> DbResult<()> {
        debug!(id, "Updating item");

        let result = sqlx::query(
            r#"
            UPDATE items
            SET name = ?2, unit_price_cents = ?3, stock = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&item.name)
        .bind(item.unit_price_cents)
        .bind(item.stock)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Deletes an item.
    ///
    /// Fails with a foreign key violation when the item is referenced by a
    /// bill line; sold items stay on the books.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }
}
