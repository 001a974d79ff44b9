//! # Repository Module
//!
//! One repository per table, each owning its SQL.
//!
//! ## Repository Pattern
//! ```text
//! Handler / Service
//!      │   db.items().get_by_id(7)
//!      ▼
//! ItemRepository        ← SQL isolated here
//!      │
//!      ▼
//! SQLite
//! ```
//!
//! Catalog repositories (items, customers, users) run every statement on
//! the pool. The bill repositories take a caller-supplied connection for
//! their writes so a header and its lines can share one transaction.

pub mod bill;
pub mod bill_line;
pub mod customer;
pub mod item;
pub mod user;
