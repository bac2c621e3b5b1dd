//! # Sales Orders
//!
//! The sales order record as the API returns it, plus everything the
//! back-office derives from it: due-date classification, financial
//! consistency, and the guard on recording a payment.
//!
//! ## Due-Date Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         now          now + 3 days                      │
//! │   ──────────────────────┼────────────────┼──────────────────────► t    │
//! │        OVERDUE          │    DUE SOON    │        (normal)             │
//! │   due < now             │ now ≤ due ≤ +3d│                             │
//! │   status ∉ {completed,  │ status ∉       │                             │
//! │     cancelled, draft}   │ {completed,    │                             │
//! │                         │  cancelled}    │                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The two predicates are evaluated independently and are never persisted.
//! `now` is always supplied by the caller.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::badge::Badge;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::party::CustomerSummary;
use crate::pricing::LineItem;
use crate::types::{PaymentMethod, PaymentStatus, Priority};
use crate::validation::validate_payment_amount;

/// Orders due within this many days are flagged "due soon".
pub const DUE_SOON_WINDOW_DAYS: i64 = 3;

// =============================================================================
// Order Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Draft,
    Confirmed,
    Processing,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Draft,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Completed and cancelled orders never need attention again.
    pub fn is_closed(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown order status: '{}'. Valid options: draft, confirmed, processing, completed, cancelled",
                    s
                )
            })
    }
}

// =============================================================================
// Classification
// =============================================================================

/// `due < now` and the order is still live (not completed, cancelled or draft).
///
/// A due date of exactly `now` is not overdue.
pub fn is_overdue(due_date: DateTime<Utc>, status: OrderStatus, now: DateTime<Utc>) -> bool {
    due_date < now && !status.is_closed() && status != OrderStatus::Draft
}

/// `now ≤ due ≤ now + 3 days` and the order is not completed or cancelled.
pub fn is_due_soon(due_date: DateTime<Utc>, status: OrderStatus, now: DateTime<Utc>) -> bool {
    is_due_soon_within(due_date, status, now, Duration::days(DUE_SOON_WINDOW_DAYS))
}

/// [`is_due_soon`] with a caller-chosen window. Never panics on a huge window.
pub fn is_due_soon_within(
    due_date: DateTime<Utc>,
    status: OrderStatus,
    now: DateTime<Utc>,
    window: Duration,
) -> bool {
    // A window past the representable range has no upper bound.
    let within = now
        .checked_add_signed(window)
        .map_or(true, |limit| due_date <= limit);
    now <= due_date && within && !status.is_closed()
}

// =============================================================================
// Sales Order
// =============================================================================

/// A sales order as served by `GET /sales`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    #[serde(alias = "_id")]
    pub id: String,

    /// Human-facing number (e.g. `SO-1042`); falls back to `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub customer_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSummary>,

    #[serde(default)]
    pub items: Vec<LineItem>,

    #[serde(default)]
    pub subtotal: Money,
    #[serde(default)]
    pub tax_amount: Money,
    #[serde(default)]
    pub discount_amount: Money,
    #[serde(default)]
    pub total_amount: Money,
    #[serde(default)]
    pub amount_paid: Money,
    #[serde(default)]
    pub amount_pending: Money,

    #[serde(default, deserialize_with = "crate::dates::deserialize_optional_datetime")]
    #[ts(as = "Option<String>")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "crate::dates::deserialize_optional_datetime")]
    #[ts(as = "Option<String>")]
    pub delivery_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,

    #[serde(default)]
    pub payment_status: PaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, deserialize_with = "crate::dates::deserialize_optional_datetime")]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A stored amount that disagrees with the order invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discrepancy {
    /// `totalAmount ≠ subtotal + taxAmount − discountAmount`
    Total { stored: Money, expected: Money },
    /// `amountPending ≠ totalAmount − amountPaid`
    Pending { stored: Money, expected: Money },
    /// `amountPending < 0` (overpaid order).
    NegativePending { stored: Money },
}

impl SalesOrder {
    /// The number printed on documents and shown in lists.
    pub fn display_number(&self) -> &str {
        self.order_number.as_deref().unwrap_or(&self.id)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date
            .is_some_and(|due| is_overdue(due, self.status, now))
    }

    pub fn is_due_soon(&self, now: DateTime<Utc>) -> bool {
        self.is_due_soon_within(now, Duration::days(DUE_SOON_WINDOW_DAYS))
    }

    pub fn is_due_soon_within(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.due_date
            .is_some_and(|due| is_due_soon_within(due, self.status, now, window))
    }

    /// Temporal flags to show next to the status badge.
    pub fn due_flags(&self, now: DateTime<Utc>, window: Duration) -> Vec<Badge> {
        let mut flags = Vec::new();
        if self.is_overdue(now) {
            flags.push(Badge::OVERDUE);
        }
        if self.is_due_soon_within(now, window) {
            flags.push(Badge::DUE_SOON);
        }
        flags
    }

    /// `subtotal + taxAmount − discountAmount`.
    pub fn expected_total(&self) -> Money {
        self.subtotal + self.tax_amount - self.discount_amount
    }

    /// `totalAmount − amountPaid`, clamped at zero for display.
    pub fn outstanding(&self) -> Money {
        (self.total_amount - self.amount_paid).clamp_non_negative()
    }

    /// Payment status implied by the amounts, independent of the stored one.
    pub fn derived_payment_status(&self) -> PaymentStatus {
        PaymentStatus::derive(self.total_amount, self.amount_paid)
    }

    /// Compares the stored amounts against the order invariants.
    ///
    /// Received data is never corrected; callers decide whether to warn.
    pub fn discrepancies(&self) -> Vec<Discrepancy> {
        let mut found = Vec::new();

        let expected_total = self.expected_total();
        if self.total_amount != expected_total {
            found.push(Discrepancy::Total {
                stored: self.total_amount,
                expected: expected_total,
            });
        }

        let expected_pending = self.total_amount - self.amount_paid;
        if self.amount_pending != expected_pending {
            found.push(Discrepancy::Pending {
                stored: self.amount_pending,
                expected: expected_pending,
            });
        }

        if self.amount_pending.is_negative() {
            found.push(Discrepancy::NegativePending {
                stored: self.amount_pending,
            });
        }

        found
    }
}

// =============================================================================
// Transactions
// =============================================================================

/// Body of `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub order_id: String,
    pub payment_method: PaymentMethod,
    pub amount: Money,
}

impl TransactionRequest {
    /// Builds a payment against `order`, enforcing the client-side guard.
    ///
    /// ## Rules
    /// - amount must be positive
    /// - amount must not exceed the order's `amountPending`
    ///
    /// This is a comparison against the copy the client holds; two
    /// concurrent payments for the same order can both pass it.
    ///
    /// ```rust
    /// use nubras_core::{Money, PaymentMethod, SalesOrder, TransactionRequest};
    ///
    /// let order: SalesOrder = serde_json::from_str(
    ///     r#"{"id":"o1","totalAmount":1050,"amountPaid":200,"amountPending":850}"#,
    /// ).unwrap();
    ///
    /// assert!(TransactionRequest::for_order(&order, PaymentMethod::Cash, Money::from_major(850)).is_ok());
    /// assert!(TransactionRequest::for_order(&order, PaymentMethod::Cash, Money::from_major(851)).is_err());
    /// ```
    pub fn for_order(
        order: &SalesOrder,
        payment_method: PaymentMethod,
        amount: Money,
    ) -> CoreResult<Self> {
        validate_payment_amount(amount)?;

        if amount > order.amount_pending {
            return Err(CoreError::PaymentExceedsPending {
                order_id: order.display_number().to_string(),
                amount,
                pending: order.amount_pending,
            });
        }

        Ok(TransactionRequest {
            order_id: order.id.clone(),
            payment_method,
            amount,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
