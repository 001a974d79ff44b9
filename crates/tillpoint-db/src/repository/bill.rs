//! # Bill Header Repository
//!
//! Database operations for bill headers.
//!
//! ## Write Path
//! ```text
//! BillingService::create_bill
//!      │  tx = pool.begin()
//!      ▼
//! BillRepository::insert_header(&mut tx, ..)   → generated id
//!      │
//!      ▼
//! BillLineRepository::save_lines(&mut tx, id, ..)
//!      │
//!      ▼
//! tx.commit()          (drop without commit = rollback)
//! ```
//!
//! The insert takes a caller-supplied connection so the header and its
//! lines always land - or vanish - together. Bills are append-only: this
//! repository deliberately has no update or delete.

use sqlx::SqliteConnection;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tillpoint_core::{Bill, NewBill};

/// Repository for bill header database operations.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Inserts a bill header on the given connection and returns the
    /// generated id.
    ///
    /// Runs on a caller-supplied connection (normally an open transaction)
    /// so the subsequent line batch shares its fate. Fails with a
    /// persistence error if the insert yields no generated id.
    pub async fn insert_header(
        &self,
        conn: &mut SqliteConnection,
        bill: &NewBill,
    ) -> DbResult<i64> {
        debug!(
            customer_id = bill.customer_id,
            user_id = bill.user_id,
            total_cents = bill.total_cents,
            "Inserting bill header"
        );

        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO bills (customer_id, user_id, bill_date, total_cents)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(bill.customer_id)
        .bind(bill.user_id)
        .bind(bill.bill_date)
        .bind(bill.total_cents)
        .fetch_optional(&mut *conn)
        .await?;

        id.ok_or_else(|| {
            DbError::QueryFailed("bill insert returned no generated id".to_string())
        })
    }

    /// Lists all bill headers, newest first.
    ///
    /// The id is the tie-breaker for bills created within the same clock
    /// tick; ids are monotonic, so insertion order wins.
    pub async fn find_all(&self) -> DbResult<Vec<Bill>> {
        let bills = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, customer_id, user_id, bill_date, total_cents
            FROM bills
            ORDER BY bill_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bills)
    }

    /// Gets a bill header by id.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Bill>> {
        let bill = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, customer_id, user_id, bill_date, total_cents
            FROM bills
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{TimeZone, Utc};
    use tillpoint_core::{NewBillLine, NewCustomer, NewItem, NewUser, UserRole};

    async fn seeded_db() -> (Database, i64, i64, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let customer = db
            .customers()
            .insert(&NewCustomer {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                address: String::new(),
                phone: "+14155550123".to_string(),
            })
            .await
            .unwrap();

        let user = db
            .users()
            .insert(&NewUser {
                first_name: "Sam".to_string(),
                last_name: "Till".to_string(),
                username: "sam".to_string(),
                password_hash: "$argon2id$v=19$placeholder".to_string(),
                role: UserRole::Cashier,
            })
            .await
            .unwrap();

        let item = db
            .items()
            .insert(&NewItem {
                name: "Espresso".to_string(),
                unit_price_cents: 1000,
                stock: 10,
            })
            .await
            .unwrap();

        (db, customer.id, user.id, item.id)
    }

    fn header(customer_id: i64, user_id: i64, total_cents: i64, day: u32) -> NewBill {
        NewBill {
            customer_id,
            user_id,
            bill_date: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
            total_cents,
        }
    }

    #[tokio::test]
    async fn test_header_and_lines_commit_together() {
        let (db, customer_id, user_id, item_id) = seeded_db().await;

        let mut tx = db.pool().begin().await.unwrap();
        let bill_id = db
            .bills()
            .insert_header(&mut tx, &header(customer_id, user_id, 2000, 1))
            .await
            .unwrap();
        db.bill_lines()
            .save_lines(
                &mut tx,
                bill_id,
                &[NewBillLine {
                    item_id,
                    quantity: 2,
                    subtotal_cents: 2000,
                }],
            )
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let bill = db.bills().find_by_id(bill_id).await.unwrap().unwrap();
        assert_eq!(bill.total_cents, 2000);

        let lines = db.bill_lines().find_by_bill_id(bill_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].subtotal_cents, 2000);
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back_header() {
        let (db, customer_id, user_id, _item_id) = seeded_db().await;

        {
            let mut tx = db.pool().begin().await.unwrap();
            db.bills()
                .insert_header(&mut tx, &header(customer_id, user_id, 2000, 1))
                .await
                .unwrap();
            // tx dropped here without commit
        }

        assert!(db.bills().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let (db, customer_id, user_id, _item_id) = seeded_db().await;

        let mut tx = db.pool().begin().await.unwrap();
        let older = db
            .bills()
            .insert_header(&mut tx, &header(customer_id, user_id, 1000, 1))
            .await
            .unwrap();
        let newer = db
            .bills()
            .insert_header(&mut tx, &header(customer_id, user_id, 3000, 2))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let bills = db.bills().find_all().await.unwrap();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].id, newer);
        assert_eq!(bills[1].id, older);
    }

    #[tokio::test]
    async fn test_unknown_customer_rejected_by_foreign_key() {
        let (db, _customer_id, user_id, _item_id) = seeded_db().await;

        let mut tx = db.pool().begin().await.unwrap();
        let err = db
            .bills()
            .insert_header(&mut tx, &header(999, user_id, 2000, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
