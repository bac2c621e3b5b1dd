//! # Validation Module
//!
//! Input validation for everything the back office sends to the API.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                   │
//! │  ├── Argument types (numbers, enums, dates)                            │
//! │  └── Immediate usage errors                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: nubras-client                                                │
//! │  ├── Path id checks before a URL is built                              │
//! │  └── THIS MODULE: field rules on request bodies                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Al Nubras API                                                │
//! │  └── Authoritative checks (uniqueness, references, concurrency)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use nubras_core::validation::{validate_resource_id, validate_stock_level};
//!
//! // Validate an id before it goes into /sales/:id
//! validate_resource_id("665f1c2ab4e0a1d2c3f4a5b6").unwrap();
//!
//! // Validate a stock adjustment
//! validate_stock_level("stock", 5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest id accepted in a URL path segment.
const MAX_ID_LEN: usize = 64;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates an id that will be placed in a URL path (`/inventory/:id`).
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Only letters, digits, hyphens and underscores, so it cannot change
///   the path it is substituted into
///
/// ## Example
/// ```rust
/// use nubras_core::validation::validate_resource_id;
///
/// assert!(validate_resource_id("665f1c2ab4e0a1d2c3f4a5b6").is_ok());
/// assert!(validate_resource_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_resource_id("../admin").is_err());
/// assert!(validate_resource_id("").is_err());
/// ```
pub fn validate_resource_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (supplier, event title, customer).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a free-text reason (return rejection, notes).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 500 characters
///
/// ## Returns
/// The trimmed text.
pub fn validate_reason(reason: &str) -> ValidationResult<String> {
    let reason = reason.trim();

    if reason.is_empty() {
        return Err(ValidationError::Required {
            field: "reason".to_string(),
        });
    }

    if reason.chars().count() > 500 {
        return Err(ValidationError::TooLong {
            field: "reason".to_string(),
            max: 500,
        });
    }

    Ok(reason.to_string())
}

/// Loose e-mail shape check: one `@`, something on both sides, a dot in
/// the domain.
///
/// ```rust
/// use nubras_core::validation::validate_email;
///
/// assert!(validate_email("orders@alnubras.ae").is_ok());
/// assert!(validate_email("orders@alnubras").is_err());
/// assert!(validate_email("@alnubras.ae").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@domain.tld".to_string(),
    };

    let (local, domain) = email.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock level or threshold (`stock`, `minStock`, `reorderPoint`).
///
/// Zero is allowed; negative stock is never written by the back office.
pub fn validate_stock_level(field: &str, level: i64) -> ValidationResult<()> {
    if level < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Example
/// ```rust
/// use nubras_core::Money;
/// use nubras_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_major(45)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_minor(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a payment amount: must be positive.
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_resource_id() {
        assert!(validate_resource_id("665f1c2ab4e0a1d2c3f4a5b6").is_ok());
        assert!(validate_resource_id("sup_12").is_ok());

        assert!(validate_resource_id("").is_err());
        assert!(validate_resource_id("   ").is_err());
        assert!(validate_resource_id("a/b").is_err());
        assert!(validate_resource_id("a?x=1").is_err());
        assert!(validate_resource_id("a b").is_err());
        assert!(validate_resource_id(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Gulf Textiles").is_ok());
        assert!(validate_name("name", "  ").is_err());
        assert!(validate_name("name", &"ن".repeat(200)).is_ok());
        assert!(validate_name("name", &"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_reason_trims() {
        assert_eq!(validate_reason("  worn after use ").unwrap(), "worn after use");
        assert!(validate_reason("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("a@@b.co").is_err());
        assert!(validate_email("ab.co").is_err());
        assert!(validate_email("a@.co").is_err());
    }

    #[test]
    fn test_validate_stock_level() {
        assert!(validate_stock_level("stock", 0).is_ok());
        assert!(validate_stock_level("minStock", 12).is_ok());
        assert!(validate_stock_level("stock", -1).is_err());
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount(Money::from_minor(1)).is_ok());
        assert!(validate_payment_amount(Money::zero()).is_err());
        assert!(validate_payment_amount(Money::from_minor(-500)).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(500).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }
}
