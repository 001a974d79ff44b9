//! # Billing Service
//!
//! The orchestrator for bill creation and bill reads.
//!
//! ## Creation Algorithm
//! ```text
//! create_bill(user_id, request)
//!   1. ensure user exists, ensure customer exists        (fail fast)
//!   2. reject an empty line list
//!   3. per line, in input order:
//!        a. reject quantity <= 0
//!        b. ensure the item exists
//!        c. resolve the authoritative unit price
//!        d. subtotal = quantity x unit price; accumulate grand total
//!   4. BEGIN; insert header -> generated id
//!   5. batch-insert all lines for that id; COMMIT
//!   6. reload lines (read-after-write, surfaces line ids)
//!   7. assemble the denormalized DTO
//! ```
//!
//! Steps 1-3 run before any write, so a validation or not-found failure
//! has zero side effects. Steps 4-5 share one transaction: an error on
//! either write drops the transaction and SQLite rolls both back, so no
//! orphaned header is ever visible to readers.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dto::{assemble_bill, assemble_line, BillDto, BillLineDto};
use crate::error::{BillingError, BillingResult};
use crate::lookup::{CustomerLookup, ItemLookup, UserLookup};
use crate::pricing::PriceResolver;
use crate::reference::ReferenceValidator;
use tillpoint_core::{Bill, BillLine, Money, NewBill, NewBillLine, ValidationError};
use tillpoint_db::{BillLineRepository, BillRepository, Database, DbError};

// =============================================================================
// Request DTOs
// =============================================================================

/// One requested line: an item and how many of it.
///
/// Deliberately priceless - the unit price is resolved server-side from
/// the catalog, and any price a client smuggles into the JSON is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItemRequest {
    pub item_id: i64,
    pub quantity: i64,
}

/// A bill creation request. The acting staff user is not part of the
/// body; it comes from the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    pub customer_id: i64,
    /// An absent list deserializes to empty and is rejected the same way.
    #[serde(default)]
    pub items: Vec<BillItemRequest>,
}

// =============================================================================
// Billing Service
// =============================================================================

/// Orchestrates bill creation and the denormalized bill reads.
///
/// Collaborators are injected at construction: the three entity lookups
/// as capability traits (substitutable with doubles in tests) and the
/// database handle whose pool carries the creation transaction.
#[derive(Clone)]
pub struct BillingService {
    db: Database,
    bills: BillRepository,
    lines: BillLineRepository,
    refs: ReferenceValidator,
    prices: PriceResolver,
    customers: Arc<dyn CustomerLookup>,
    users: Arc<dyn UserLookup>,
    items: Arc<dyn ItemLookup>,
}

impl BillingService {
    /// Creates a billing service over the given collaborators.
    pub fn new(
        db: Database,
        customers: Arc<dyn CustomerLookup>,
        users: Arc<dyn UserLookup>,
        items: Arc<dyn ItemLookup>,
    ) -> Self {
        BillingService {
            bills: db.bills(),
            lines: db.bill_lines(),
            refs: ReferenceValidator::new(customers.clone(), users.clone(), items.clone()),
            prices: PriceResolver::new(items.clone()),
            customers,
            users,
            items,
            db,
        }
    }

    /// Production wiring: the database's own repositories serve as the
    /// entity lookups.
    pub fn with_sqlite(db: Database) -> Self {
        let customers = Arc::new(db.customers());
        let users = Arc::new(db.users());
        let items = Arc::new(db.items());
        BillingService::new(db, customers, users, items)
    }

    /// Creates a bill for the given staff user.
    ///
    /// Validates every reference and quantity before the first write,
    /// prices each line from the catalog, and persists the header and
    /// lines in one transaction. On success the returned DTO's total
    /// exactly equals the sum of its line subtotals; on any failure
    /// nothing was persisted.
    pub async fn create_bill(
        &self,
        user_id: i64,
        req: CreateBillRequest,
    ) -> BillingResult<BillDto> {
        debug!(user_id, customer_id = req.customer_id, lines = req.items.len(), "create_bill");

        self.refs.ensure_user(user_id).await?;
        self.refs.ensure_customer(req.customer_id).await?;

        if req.items.is_empty() {
            return Err(ValidationError::EmptyBill.into());
        }

        let mut new_lines = Vec::with_capacity(req.items.len());
        let mut grand_total = Money::zero();

        for line in &req.items {
            if line.quantity <= 0 {
                return Err(ValidationError::NonPositiveQuantity {
                    item_id: line.item_id,
                }
                .into());
            }

            self.refs.ensure_item(line.item_id).await?;
            let unit_price = self.prices.price_of(line.item_id).await?;

            let subtotal = unit_price.multiply_quantity(line.quantity);
            grand_total += subtotal;

            new_lines.push(NewBillLine {
                item_id: line.item_id,
                quantity: line.quantity,
                subtotal_cents: subtotal.cents(),
            });
        }

        let header = NewBill {
            customer_id: req.customer_id,
            user_id,
            bill_date: Utc::now(),
            total_cents: grand_total.cents(),
        };

        // Header and lines commit together or not at all; every error
        // path drops the transaction, which rolls both writes back.
        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;
        let bill_id = self.bills.insert_header(&mut tx, &header).await?;
        self.lines.save_lines(&mut tx, bill_id, &new_lines).await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(
            bill_id,
            total_cents = header.total_cents,
            lines = new_lines.len(),
            "Bill created"
        );

        let saved_lines = self.lines.find_by_bill_id(bill_id).await?;
        let bill = Bill {
            id: bill_id,
            customer_id: header.customer_id,
            user_id: header.user_id,
            bill_date: header.bill_date,
            total_cents: header.total_cents,
        };

        self.assemble(&bill, Some(saved_lines)).await
    }

    /// Lists all bills as denormalized headers, newest first.
    pub async fn list_bills(&self) -> BillingResult<Vec<BillDto>> {
        let bills = self.bills.find_all().await?;

        let mut out = Vec::with_capacity(bills.len());
        for bill in &bills {
            out.push(self.assemble(bill, None).await?);
        }

        Ok(out)
    }

    /// Gets one bill with its lines.
    pub async fn get_bill(&self, id: i64) -> BillingResult<BillDto> {
        let bill = self
            .bills
            .find_by_id(id)
            .await?
            .ok_or_else(|| BillingError::not_found("Bill", id))?;

        let lines = self.lines.find_by_bill_id(id).await?;
        self.assemble(&bill, Some(lines)).await
    }

    /// Gets only the line items of a bill. NotFound for an unknown bill.
    pub async fn lines_for_bill(&self, id: i64) -> BillingResult<Vec<BillLineDto>> {
        if self.bills.find_by_id(id).await?.is_none() {
            return Err(BillingError::not_found("Bill", id));
        }

        let lines = self.lines.find_by_bill_id(id).await?;
        self.line_dtos(&lines).await
    }

    /// Resolves customer/user display records and joins item fields onto
    /// each line.
    async fn assemble(&self, bill: &Bill, lines: Option<Vec<BillLine>>) -> BillingResult<BillDto> {
        let customer = self
            .customers
            .find_by_id(bill.customer_id)
            .await?
            .ok_or_else(|| BillingError::not_found("Customer", bill.customer_id))?;

        let user = self
            .users
            .find_by_id(bill.user_id)
            .await?
            .ok_or_else(|| BillingError::not_found("User", bill.user_id))?;

        let line_dtos = match lines {
            Some(lines) => Some(self.line_dtos(&lines).await?),
            None => None,
        };

        Ok(assemble_bill(bill, customer, user, line_dtos))
    }

    async fn line_dtos(&self, lines: &[BillLine]) -> BillingResult<Vec<BillLineDto>> {
        let mut out = Vec::with_capacity(lines.len());

        for line in lines {
            let item = self
                .items
                .find_by_id(line.item_id)
                .await?
                .ok_or_else(|| BillingError::not_found("Item", line.item_id))?;
            out.push(assemble_line(line, &item));
        }

        Ok(out)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{cashier, customer, item, FixedCustomers, FixedItems, FixedUsers};
    use tillpoint_core::{NewCustomer, NewItem, NewUser, UserRole};
    use tillpoint_db::DbConfig;

    struct Fixture {
        svc: BillingService,
        db: Database,
        customer_id: i64,
        user_id: i64,
        item1: i64,
        item2: i64,
    }

    /// Seeds an in-memory database (the foreign keys on bills/bill_items
    /// are real) and mirrors the rows into lookup doubles, so the
    /// aggregator's reads go through the capability traits while its
    /// writes hit actual SQLite.
    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let c = db
            .customers()
            .insert(&NewCustomer {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                address: "12 Harbor Rd".to_string(),
                phone: "+14155550123".to_string(),
            })
            .await
            .unwrap();
        let u = db
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
        let i1 = db
            .items()
            .insert(&NewItem {
                name: "Espresso".to_string(),
                unit_price_cents: 1000,
                stock: 100,
            })
            .await
            .unwrap();
        let i2 = db
            .items()
            .insert(&NewItem {
                name: "Croissant".to_string(),
                unit_price_cents: 2000,
                stock: 100,
            })
            .await
            .unwrap();

        let svc = BillingService::new(
            db.clone(),
            Arc::new(FixedCustomers::with([c.clone()])),
            Arc::new(FixedUsers::with([u.clone()])),
            Arc::new(FixedItems::with([i1.clone(), i2.clone()])),
        );

        Fixture {
            svc,
            db,
            customer_id: c.id,
            user_id: u.id,
            item1: i1.id,
            item2: i2.id,
        }
    }

    fn request(customer_id: i64, items: Vec<(i64, i64)>) -> CreateBillRequest {
        CreateBillRequest {
            customer_id,
            items: items
                .into_iter()
                .map(|(item_id, quantity)| BillItemRequest { item_id, quantity })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_bill_prices_lines_and_totals() {
        let f = fixture().await;

        let dto = f
            .svc
            .create_bill(
                f.user_id,
                request(f.customer_id, vec![(f.item1, 2), (f.item2, 3)]),
            )
            .await
            .unwrap();

        let lines = dto.lines.as_ref().unwrap();
        assert_eq!(lines.len(), 2);

        // Input order preserved; subtotals from catalog prices.
        assert_eq!(lines[0].item_id, f.item1);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].subtotal_cents, 2000);
        assert_eq!(lines[1].item_id, f.item2);
        assert_eq!(lines[1].quantity, 3);
        assert_eq!(lines[1].subtotal_cents, 6000);

        assert_eq!(dto.total_cents, 8000);
        let sum: i64 = lines.iter().map(|l| l.subtotal_cents).sum();
        assert_eq!(dto.total_cents, sum);

        // Display fields joined from the referenced records.
        assert_eq!(lines[0].item_name, "Espresso");
        assert_eq!(dto.customer.first_name, "Jane");
        assert_eq!(dto.user.username, "sam");

        // Persisted, with generated ids surfaced.
        assert!(dto.id > 0);
        assert!(lines.iter().all(|l| l.line_id > 0));
        let stored = f.db.bills().find_by_id(dto.id).await.unwrap().unwrap();
        assert_eq!(stored.total_cents, 8000);
    }

    #[tokio::test]
    async fn test_create_bill_quantity_one_is_valid() {
        let f = fixture().await;

        let dto = f
            .svc
            .create_bill(f.user_id, request(f.customer_id, vec![(f.item1, 1)]))
            .await
            .unwrap();

        assert_eq!(dto.total_cents, 1000);
    }

    #[tokio::test]
    async fn test_create_bill_rejects_empty_lines() {
        let f = fixture().await;

        let err = f
            .svc
            .create_bill(f.user_id, request(f.customer_id, vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::Validation(_)));
        assert_eq!(err.to_string(), "Bill must contain at least one item");
        assert!(f.db.bills().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_absent_line_list_deserializes_to_empty() {
        let req: CreateBillRequest = serde_json::from_str(r#"{"customerId": 1}"#).unwrap();
        assert!(req.items.is_empty());
    }

    #[tokio::test]
    async fn test_create_bill_rejects_non_positive_quantity() {
        let f = fixture().await;

        for quantity in [0, -3] {
            let err = f
                .svc
                .create_bill(f.user_id, request(f.customer_id, vec![(f.item1, quantity)]))
                .await
                .unwrap_err();

            assert_eq!(
                err.to_string(),
                format!("Quantity must be > 0 for item {}", f.item1)
            );
        }

        assert!(f.db.bills().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_bill_rejects_unknown_item() {
        let f = fixture().await;

        let err = f
            .svc
            .create_bill(f.user_id, request(f.customer_id, vec![(99, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::NotFound { .. }));
        assert_eq!(err.to_string(), "Item not found: 99");
        assert!(f.db.bills().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_bill_rejects_unknown_customer_and_user() {
        let f = fixture().await;

        let err = f
            .svc
            .create_bill(f.user_id, request(999, vec![(f.item1, 1)]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Customer not found: 999");

        let err = f
            .svc
            .create_bill(999, request(f.customer_id, vec![(f.item1, 1)]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User not found: 999");

        assert!(f.db.bills().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_smuggled_price_fields_are_ignored() {
        let f = fixture().await;

        // The request schema has no price field; a client adding one
        // changes nothing about the persisted subtotal.
        let json = format!(
            r#"{{"customerId": {}, "items": [{{"itemId": {}, "quantity": 2, "unitPriceCents": 1, "price": 0.01}}]}}"#,
            f.customer_id, f.item1
        );
        let req: CreateBillRequest = serde_json::from_str(&json).unwrap();

        let dto = f.svc.create_bill(f.user_id, req).await.unwrap();

        assert_eq!(dto.total_cents, 2000);
        assert_eq!(dto.lines.unwrap()[0].subtotal_cents, 2000);
    }

    #[tokio::test]
    async fn test_failed_line_write_rolls_back_header() {
        let f = fixture().await;

        // The lookups vouch for a phantom item the store has never seen,
        // so validation and pricing pass but the line insert trips the
        // foreign key - after the header was already written.
        let svc = BillingService::new(
            f.db.clone(),
            Arc::new(FixedCustomers::with([customer(f.customer_id)])),
            Arc::new(FixedUsers::with([cashier(f.user_id)])),
            Arc::new(FixedItems::with([item(4242, "Phantom", 999)])),
        );

        let err = svc
            .create_bill(f.user_id, request(f.customer_id, vec![(4242, 1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, BillingError::Persistence(_)));

        // Full rollback: no orphaned header is visible to readers.
        assert!(f.db.bills().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_bill_reads_are_idempotent() {
        let f = fixture().await;

        let created = f
            .svc
            .create_bill(
                f.user_id,
                request(f.customer_id, vec![(f.item1, 2), (f.item2, 3)]),
            )
            .await
            .unwrap();

        let first = f.svc.get_bill(created.id).await.unwrap();
        let second = f.svc.get_bill(created.id).await.unwrap();

        assert_eq!(first.total_cents, 8000);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_get_bill_unknown_id() {
        let f = fixture().await;

        let err = f.svc.get_bill(12345).await.unwrap_err();
        assert_eq!(err.to_string(), "Bill not found: 12345");
    }

    #[tokio::test]
    async fn test_list_bills_newest_first_without_lines() {
        let f = fixture().await;

        let older = f
            .svc
            .create_bill(f.user_id, request(f.customer_id, vec![(f.item1, 1)]))
            .await
            .unwrap();
        let newer = f
            .svc
            .create_bill(f.user_id, request(f.customer_id, vec![(f.item2, 1)]))
            .await
            .unwrap();

        let bills = f.svc.list_bills().await.unwrap();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].id, newer.id);
        assert_eq!(bills[1].id, older.id);
        assert!(bills.iter().all(|b| b.lines.is_none()));
    }

    #[tokio::test]
    async fn test_lines_for_bill() {
        let f = fixture().await;

        let created = f
            .svc
            .create_bill(
                f.user_id,
                request(f.customer_id, vec![(f.item1, 2), (f.item2, 3)]),
            )
            .await
            .unwrap();

        let lines = f.svc.lines_for_bill(created.id).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines.iter().map(|l| l.subtotal_cents).sum::<i64>(),
            created.total_cents
        );

        let err = f.svc.lines_for_bill(9999).await.unwrap_err();
        assert_eq!(err.to_string(), "Bill not found: 9999");
    }

    #[tokio::test]
    async fn test_billing_never_touches_stock() {
        let f = fixture().await;

        let before = f.db.items().get_by_id(f.item1).await.unwrap().unwrap().stock;
        f.svc
            .create_bill(f.user_id, request(f.customer_id, vec![(f.item1, 5)]))
            .await
            .unwrap();
        let after = f.db.items().get_by_id(f.item1).await.unwrap().unwrap().stock;

        assert_eq!(before, after);
    }
}
