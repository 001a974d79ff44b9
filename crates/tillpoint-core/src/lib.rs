//! # tillpoint-core: Pure Business Logic for Tillpoint
//!
//! This crate holds everything the rest of the system agrees on without
//! touching I/O: monetary arithmetic, the entity types, the validation
//! rules that gate writes, and the validation error vocabulary.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  apps/pos-api        REST handlers, auth, envelopes             │
//! │       │                                                         │
//! │  tillpoint-billing   bill aggregation workflow                  │
//! │       │                                                         │
//! │  tillpoint-db        SQLite pool + repositories                 │
//! │       │                                                         │
//! │  ★ tillpoint-core ★  Money, Item/Customer/User/Bill, rules      │
//! │                                                                 │
//! │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Integer money**: every monetary value is cents (`i64`), never floats
//! 2. **Explicit errors**: validation failures are typed enum variants
//! 3. **No I/O**: database, network and clock access stay in outer crates

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;
