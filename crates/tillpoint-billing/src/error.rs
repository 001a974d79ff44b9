//! # Billing Error Taxonomy
//!
//! Three outcomes, three HTTP destinies:
//!
//! ```text
//! Validation   - user-correctable request problem        → 400
//! NotFound     - a referenced id denotes no row          → 404
//! Persistence  - the store failed underneath us          → 500
//! ```
//!
//! Every failure of the creation workflow surfaces before the first write
//! or rolls the transaction back, so an error here always means "nothing
//! was persisted".

use thiserror::Error;

use tillpoint_core::ValidationError;
use tillpoint_db::DbError;

/// Errors from the bill aggregation workflow.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Malformed or semantically invalid request.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced customer, user, item or bill does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Underlying store failure, wrapped with operation context by the
    /// database layer.
    #[error(transparent)]
    Persistence(#[from] DbError),
}

impl BillingError {
    /// Creates a NotFound error for a given entity kind and id.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        BillingError::NotFound { entity, id }
    }
}

/// Result type for billing operations.
pub type BillingResult<T> = Result<T, BillingError>;
