//! # Error Types
//!
//! Domain-specific error types for nubras-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nubras-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  nubras-client errors (separate crate)                                 │
//! │  └── ClientError      - Transport / HTTP status / config failures      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → CLI (anyhow)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
///
/// These are raised by the client-side guards before anything is sent to
/// the API.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A payment would exceed what is still owed on the order.
    ///
    /// ## User Workflow
    /// ```text
    /// Record Payment (amount: 900.00)
    ///      │
    ///      ▼
    /// Order pending: 850.00
    ///      │
    ///      ▼
    /// PaymentExceedsPending { order_id, amount: 900.00, pending: 850.00 }
    /// ```
    #[error("Payment of {amount} exceeds the pending balance of {pending} on order {order_id}")]
    PaymentExceedsPending {
        order_id: String,
        amount: Money,
        pending: Money,
    },

    /// A lifecycle transition that the status graph does not allow.
    #[error("{entity} {id} cannot move from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        id: String,
        from: String,
        to: String,
    },

    /// A return line refunds more than was originally charged.
    #[error("Refund of {refund} for '{item}' exceeds its original total of {original}")]
    RefundExceedsOriginal {
        item: String,
        refund: Money,
        original: Money,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
