//! # Domain Types
//!
//! Entity types shared by every layer of Tillpoint.
//!
//! ## Type Overview
//! ```text
//! ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//! │    Item      │  │   Customer   │  │     User     │
//! │ ──────────── │  │ ──────────── │  │ ──────────── │
//! │ id           │  │ id           │  │ id           │
//! │ name         │  │ first_name   │  │ username     │
//! │ unit_price_* │  │ last_name    │  │ password_hash│
//! │ stock        │  │ phone        │  │ role         │
//! └──────────────┘  └──────────────┘  └──────────────┘
//!         ▲                ▲                 ▲
//!         │ item_id        │ customer_id     │ user_id
//! ┌───────┴───────┐  ┌─────┴────────────────┴─────┐
//! │   BillLine    │  │           Bill             │
//! │  quantity     │──│  bill_date, total_cents    │
//! │  subtotal_*   │  └────────────────────────────┘
//! └───────────────┘
//! ```
//!
//! Ids are `i64` keys generated by the store on insert. The `New*`
//! companions describe a row before it has an id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Staff Role
// =============================================================================

/// Role of a staff user, controlling what the API lets them do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Full access, including staff management.
    Admin,
    /// Day-to-day sales operation.
    Cashier,
}

impl UserRole {
    /// Parses a role from its wire form ("ADMIN" / "CASHIER").
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "CASHIER" => Ok(UserRole::Cashier),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["ADMIN".to_string(), "CASHIER".to_string()],
            }),
        }
    }

    /// The canonical wire/storage form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Cashier => "CASHIER",
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// A sellable catalog item. The authoritative price source for bill lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,

    /// Display name shown on bills.
    pub name: String,

    /// Current unit price in cents. Always > 0.
    pub unit_price_cents: i64,

    /// Stock on hand. Informational only: bill creation never changes it.
    pub stock: i64,
}

impl Item {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

/// An item before it has been inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub unit_price_cents: i64,
    #[serde(default)]
    pub stock: i64,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer a bill can be issued to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    /// Unique contact number in international format (+ then 10-15 digits).
    pub phone: String,
}

/// A customer before it has been inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    pub phone: String,
}

// =============================================================================
// Staff User
// =============================================================================

/// A staff user who can log in and create bills.
///
/// The password is stored as an argon2 hash and never serialized; client
/// representations go through a DTO that omits it entirely.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Unique login name.
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
}

/// A staff user before insertion. Carries the already-hashed password;
/// hashing happens at the API boundary where the plaintext arrives.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
}

// =============================================================================
// Bill Header
// =============================================================================

/// A persisted bill header. Immutable once created: bills are append-only
/// and have no update, void or cancel path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: i64,
    pub customer_id: i64,
    pub user_id: i64,
    pub bill_date: DateTime<Utc>,
    /// Sum of all line subtotals, in cents. Always > 0.
    pub total_cents: i64,
}

impl Bill {
    /// Returns the bill total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A bill header before insertion (id comes from the store).
#[derive(Debug, Clone)]
pub struct NewBill {
    pub customer_id: i64,
    pub user_id: i64,
    pub bill_date: DateTime<Utc>,
    pub total_cents: i64,
}

// =============================================================================
// Bill Line
// =============================================================================

/// One line of a bill: an item, a quantity, and the subtotal frozen at
/// creation time from the catalog price. Never recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct BillLine {
    pub id: i64,
    pub bill_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    /// quantity x unit price at creation time, in cents.
    pub subtotal_cents: i64,
}

impl BillLine {
    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

/// A bill line before insertion; the header id is supplied by the write.
#[derive(Debug, Clone)]
pub struct NewBillLine {
    pub item_id: i64,
    pub quantity: i64,
    pub subtotal_cents: i64,
}
