//! # Bill Line Repository
//!
//! Database operations for the line items belonging to a bill header.
//!
//! Lines are written as one batch on the transaction opened for the
//! header insert; a failure on any row fails the whole batch and the
//! caller's rollback removes the header with it. The `price_cents` column
//! holds the line subtotal frozen at creation time. Like headers, lines
//! are append-only.

use sqlx::SqliteConnection;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use tillpoint_core::{BillLine, NewBillLine};

/// Repository for bill line database operations.
#[derive(Debug, Clone)]
pub struct BillLineRepository {
    pool: SqlitePool,
}

impl BillLineRepository {
    /// Creates a new BillLineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillLineRepository { pool }
    }

    /// Inserts all given lines for one bill header as a single batch.
    ///
    /// Runs on the caller-supplied connection so the batch shares the
    /// header's transaction. The first failing row aborts the batch; no
    /// partial set of lines can ever be committed.
    pub async fn save_lines(
        &self,
        conn: &mut SqliteConnection,
        bill_id: i64,
        lines: &[NewBillLine],
    ) -> DbResult<()> {
        debug!(bill_id, count = lines.len(), "Saving bill lines");

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO bill_items (bill_id, item_id, quantity, price_cents)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(bill_id)
            .bind(line.item_id)
            .bind(line.quantity)
            .bind(line.subtotal_cents)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// Gets all lines for a bill header, in insertion order.
    pub async fn find_by_bill_id(&self, bill_id: i64) -> DbResult<Vec<BillLine>> {
        let lines = sqlx::query_as::<_, BillLine>(
            r#"
            SELECT id, bill_id, item_id, quantity, price_cents AS subtotal_cents
            FROM bill_items
            WHERE bill_id = ?1
            ORDER BY id
            "#,
        )
        .bind(bill_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }
}
