//! # Shared Domain Types
//!
//! Small value types used across orders, quotations and returns.
//!
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │    TaxRate      │   │    Priority     │   │ PaymentMethod   │
//! │  ─────────────  │   │  ─────────────  │   │  ─────────────  │
//! │  bps (u32)      │   │  low            │   │  cash           │
//! │  500 = 5% VAT   │   │  medium         │   │  card           │
//! └─────────────────┘   │  high           │   │  bank-transfer  │
//!                       │  urgent         │   │  cheque         │
//! ┌─────────────────┐   └─────────────────┘   └─────────────────┘
//! │ PaymentStatus   │
//! │  pending        │
//! │  partial / paid │
//! │  refunded       │
//! └─────────────────┘
//! ```
//!
//! Every enum here carries an `Unknown` variant: the API owns these values,
//! and a literal we have never seen must still deserialize and render.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 500 bps = 5% (UAE VAT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Standard 5% VAT.
    pub const VAT: TaxRate = TaxRate(500);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::VAT
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Priority
// =============================================================================

/// How urgently a sales order needs to be worked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
    #[serde(other)]
    Unknown,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    /// Sort key, most urgent first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
            Priority::Unknown => 4,
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Cheque,
    #[serde(other)]
    Unknown,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::BankTransfer,
        PaymentMethod::Cheque,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Cheque => "Cheque",
            PaymentMethod::Unknown => "Other",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" | "credit-card" | "debit-card" => Ok(PaymentMethod::Card),
            "bank-transfer" | "bank" | "transfer" => Ok(PaymentMethod::BankTransfer),
            "cheque" | "check" => Ok(PaymentMethod::Cheque),
            other => Err(format!(
                "Unknown payment method: '{}'. Valid options: cash, card, bank-transfer, cheque",
                other
            )),
        }
    }
}

// =============================================================================
// Payment Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Partial,
    Paid,
    Refunded,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Partial,
        PaymentStatus::Paid,
        PaymentStatus::Refunded,
    ];

    /// Derives the payment status from what was paid against what is owed.
    ///
    /// ```rust
    /// use nubras_core::{Money, PaymentStatus};
    ///
    /// let total = Money::from_major(1050);
    /// assert_eq!(PaymentStatus::derive(total, Money::zero()), PaymentStatus::Pending);
    /// assert_eq!(PaymentStatus::derive(total, Money::from_major(200)), PaymentStatus::Partial);
    /// assert_eq!(PaymentStatus::derive(total, total), PaymentStatus::Paid);
    /// ```
    pub fn derive(total: Money, paid: Money) -> Self {
        if paid >= total {
            PaymentStatus::Paid
        } else if paid.is_positive() {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Pending
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
    }

    #[test]
    fn test_tax_rate_default_is_vat() {
        assert_eq!(TaxRate::default(), TaxRate::VAT);
        assert_eq!(TaxRate::VAT.to_string(), "5%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
    }

    #[test]
    fn test_unknown_literals_deserialize() {
        let p: Priority = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(p, Priority::Unknown);

        let m: PaymentMethod = serde_json::from_str("\"bank-transfer\"").unwrap();
        assert_eq!(m, PaymentMethod::BankTransfer);

        let s: PaymentStatus = serde_json::from_str("\"written-off\"").unwrap();
        assert_eq!(s, PaymentStatus::Unknown);
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("Bank_Transfer".parse::<PaymentMethod>().unwrap(), PaymentMethod::BankTransfer);
        assert_eq!("check".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cheque);
        assert!("barter".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_priority_rank_orders_urgent_first() {
        let mut all = Priority::ALL.to_vec();
        all.sort_by_key(Priority::rank);
        assert_eq!(all.first(), Some(&Priority::Urgent));
        assert_eq!(all.last(), Some(&Priority::Low));
    }

    #[test]
    fn test_payment_status_derive_overpaid_is_paid() {
        let status = PaymentStatus::derive(Money::from_major(100), Money::from_major(120));
        assert_eq!(status, PaymentStatus::Paid);
    }
}
