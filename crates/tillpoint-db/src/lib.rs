//! # tillpoint-db: Database Layer for Tillpoint
//!
//! SQLite storage for the POS backend, built on sqlx.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per table
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tillpoint_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("tillpoint.db")).await?;
//! let item = db.items().get_by_id(1).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::bill::BillRepository;
pub use repository::bill_line::BillLineRepository;
pub use repository::customer::CustomerRepository;
pub use repository::item::ItemRepository;
pub use repository::user::UserRepository;
