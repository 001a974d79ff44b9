//! # Validation Errors
//!
//! The shared vocabulary for input validation failures.
//!
//! ## Error Flow
//! ```text
//! ValidationError (this module)
//!      │  raised by validation.rs rules and the billing workflow
//!      ▼
//! BillingError::Validation (tillpoint-billing)
//!      │
//!      ▼
//! ApiError → HTTP 400 with the variant's message
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derive, never manual Display impls
//! 2. Errors are enum variants carrying context, never bare Strings
//! 3. Each variant's message is what the client ultimately sees

use thiserror::Error;

/// Input validation errors.
///
/// Raised before any write happens; a request that trips one of these has
/// caused no side effects.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is shorter than allowed.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is longer than allowed.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (zero is fine).
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. malformed phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set (e.g. unknown role).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed {
        field: String,
        allowed: Vec<String>,
    },

    /// Duplicate value for a unique field (username, phone).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A bill creation request carried no line items.
    #[error("Bill must contain at least one item")]
    EmptyBill,

    /// A bill line requested a non-positive quantity.
    #[error("Quantity must be > 0 for item {item_id}")]
    NonPositiveQuantity { item_id: i64 },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
