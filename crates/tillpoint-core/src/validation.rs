//! # Validation Module
//!
//! Field-level validation rules, applied before any write reaches the
//! database.
//!
//! ## Validation Layers
//! ```text
//! Layer 1: HTTP deserialization   - type errors rejected by serde
//! Layer 2: THIS MODULE            - business field rules
//! Layer 3: SQLite constraints     - NOT NULL / UNIQUE / CHECK / FK
//! ```
//!
//! Uniqueness rules (username, phone) need a lookup and therefore live
//! with the callers that own a repository; everything here is pure.

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// Text Fields
// =============================================================================

/// Validates a person name field (customer or staff first/last name).
///
/// ## Rules
/// - Must not be blank
/// - Maximum 100 characters
pub fn validate_person_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an item display name.
///
/// ## Rules
/// - Must not be blank
/// - Maximum 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a login username.
///
/// ## Rules
/// - Must not be blank
/// - Maximum 50 characters
/// - Letters, digits, dots, hyphens and underscores only
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, dots, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a plaintext password before it is hashed.
///
/// ## Rules
/// - Must not be blank
/// - At least 6 characters
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.len() < 6 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        });
    }

    Ok(())
}

/// Validates a customer phone number.
///
/// ## Rules
/// Fixed international format: a leading `+` followed by 10 to 15 digits.
///
/// ## Example
/// ```rust
/// use tillpoint_core::validation::validate_phone;
///
/// assert!(validate_phone("+14155550123").is_ok());
/// assert!(validate_phone("4155550123").is_err());   // missing +
/// assert!(validate_phone("+1-415-555").is_err());   // separators
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "phone".to_string(),
        reason: "must be an international number like +14155550123".to_string(),
    };

    let digits = phone.strip_prefix('+').ok_or_else(invalid)?;

    if digits.len() < 10 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    Ok(())
}

// =============================================================================
// Numeric Fields
// =============================================================================

/// Validates an item unit price in cents.
///
/// ## Rules
/// - Must be strictly positive (free items are not sellable)
pub fn validate_unit_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Validates an item stock level.
///
/// ## Rules
/// - Must not be negative (zero means out of stock, which is still valid)
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}
