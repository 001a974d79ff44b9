//! # DTO Assembler
//!
//! Client-facing projections of a bill: the persisted header and lines
//! joined with display fields from the customer, staff user and item
//! records they reference. Assembly is read-time work; nothing here
//! writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tillpoint_core::{Bill, BillLine, Customer, Item, User, UserRole};

/// A staff user as clients see it. No password material, ever.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub role: UserRole,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            role: user.role,
        }
    }
}

/// One bill line joined with its item's display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineDto {
    pub line_id: i64,
    pub item_id: i64,
    pub item_name: String,
    /// The item's current catalog price, for display.
    pub unit_price_cents: i64,
    pub quantity: i64,
    /// The subtotal frozen at creation time.
    pub subtotal_cents: i64,
}

/// A denormalized bill: header fields plus the referenced customer and
/// user records. `lines` is omitted in header-only listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDto {
    pub id: i64,
    pub customer: Customer,
    pub user: UserDto,
    pub created_at: DateTime<Utc>,
    pub total_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<BillLineDto>>,
}

/// Joins a persisted line with its item's display fields.
pub fn assemble_line(line: &BillLine, item: &Item) -> BillLineDto {
    BillLineDto {
        line_id: line.id,
        item_id: item.id,
        item_name: item.name.clone(),
        unit_price_cents: item.unit_price_cents,
        quantity: line.quantity,
        subtotal_cents: line.subtotal_cents,
    }
}

/// Builds the denormalized bill projection.
pub fn assemble_bill(
    bill: &Bill,
    customer: Customer,
    user: User,
    lines: Option<Vec<BillLineDto>>,
) -> BillDto {
    BillDto {
        id: bill.id,
        customer,
        user: UserDto::from(user),
        created_at: bill.bill_date,
        total_cents: bill.total_cents,
        lines,
    }
}
