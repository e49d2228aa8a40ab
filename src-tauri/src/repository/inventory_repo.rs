//! Inventory Repository Implementation
//!
//! SQLite-backed implementation of Repository<InventoryItem> and CounterRepository

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{
    normalize_name, DecrementOutcome, DomainError, DomainResult, InventoryItem,
};
use super::db::SharedConnection;
use super::traits::{CounterRepository, Repository};

/// SQLite implementation of the inventory collection
pub struct InventoryRepository {
    conn: SharedConnection,
}

impl InventoryRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Run `op` on the blocking pool while holding the connection
    async fn with_conn<R, F>(&self, op: F) -> DomainResult<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut Connection) -> DomainResult<R> + Send + 'static,
    {
        let mut guard = self.conn.clone().lock_owned().await;
        tokio::task::spawn_blocking(move || {
            let conn = guard.as_mut().ok_or_else(not_initialized)?;
            op(conn)
        })
        .await
        .map_err(DomainError::internal)?
    }
}

fn not_initialized() -> DomainError {
    DomainError::Internal("Database not initialized".to_string())
}

#[async_trait]
impl Repository<InventoryItem> for InventoryRepository {
    async fn find_by_id(&self, name: &String) -> DomainResult<Option<InventoryItem>> {
        let name = normalize_name(name)?;
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT name, quantity FROM inventory WHERE name = ?1",
                params![name],
                row_to_item,
            )
            .optional()
            .map_err(DomainError::internal)
        })
        .await
    }

    async fn list(&self) -> DomainResult<Vec<InventoryItem>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT name, quantity FROM inventory ORDER BY name")
                .map_err(DomainError::internal)?;
            let items = stmt
                .query_map([], row_to_item)
                .map_err(DomainError::internal)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(DomainError::internal)?;
            Ok(items)
        })
        .await
    }

    async fn delete(&self, name: &String) -> DomainResult<()> {
        let name = normalize_name(name)?;
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM inventory WHERE name = ?1", params![name])
                .map_err(DomainError::internal)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl CounterRepository for InventoryRepository {
    async fn increment(&self, name: &str) -> DomainResult<InventoryItem> {
        let name = normalize_name(name)?;
        self.with_conn(move |conn| {
            conn.query_row(
                "INSERT INTO inventory (name, quantity) VALUES (?1, 1)
                 ON CONFLICT(name) DO UPDATE SET quantity = quantity + 1
                 RETURNING name, quantity",
                params![name],
                row_to_item,
            )
            .map_err(DomainError::internal)
        })
        .await
    }

    async fn decrement_or_delete(&self, name: &str) -> DomainResult<DecrementOutcome> {
        let name = normalize_name(name)?;
        self.with_conn(move |conn| {
            let tx = conn.transaction().map_err(DomainError::internal)?;

            let decremented = tx
                .query_row(
                    "UPDATE inventory SET quantity = quantity - 1
                     WHERE name = ?1 AND quantity > 1
                     RETURNING name, quantity",
                    params![name],
                    row_to_item,
                )
                .optional()
                .map_err(DomainError::internal)?;

            let outcome = match decremented {
                Some(item) => DecrementOutcome::Decremented { item },
                None => {
                    // Either the last unit or no such item
                    let deleted = tx
                        .execute("DELETE FROM inventory WHERE name = ?1", params![name])
                        .map_err(DomainError::internal)?;
                    if deleted > 0 {
                        DecrementOutcome::Deleted { name }
                    } else {
                        DecrementOutcome::Missing { name }
                    }
                }
            };

            tx.commit().map_err(DomainError::internal)?;
            Ok(outcome)
        })
        .await
    }
}

/// Convert a database row to InventoryItem
fn row_to_item(row: &Row<'_>) -> rusqlite::Result<InventoryItem> {
    Ok(InventoryItem {
        name: row.get(0)?,
        quantity: row.get(1)?,
    })
}
