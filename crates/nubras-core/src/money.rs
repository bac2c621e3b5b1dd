//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ONE ROUNDING POLICY                                                    │
//! │                                                                         │
//! │  The API sends amounts as JSON decimals in major units:                │
//! │    "totalAmount": 1050.5                                               │
//! │                                                                         │
//! │  On arrival they are parsed exactly (rust_decimal) and rounded         │
//! │  half-up to the minor unit (fils):                                     │
//! │    1050.5 → 105050 fils                                                │
//! │                                                                         │
//! │  All arithmetic after that is integer. Display is ALWAYS two decimals. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nubras_core::money::Money;
//!
//! let price = Money::from_minor(1099); // 10.99
//! let doubled = price * 2;             // 21.98
//! let total = price + Money::from_minor(500);
//! assert_eq!(total.to_string(), "15.99");
//! assert_eq!(doubled.minor(), 2198);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (fils for AED).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Wire format**: a JSON number in major units (`10.99`), which is what
///   the back-office API speaks
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LineItem.unit_price × quantity ──► Totals.subtotal                     │
/// │                                          │                              │
/// │                                          ├──► tax (5%) ──► total        │
/// │                                          │                              │
/// │  SalesOrder.amount_paid ─────────────────┴──► amount_pending            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from minor units (fils / cents).
    ///
    /// ## Example
    /// ```rust
    /// use nubras_core::money::Money;
    ///
    /// let price = Money::from_minor(1099);
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    ///
    /// ```rust
    /// use nubras_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(1050).minor(), 105_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(100))
    }

    /// Converts an exact decimal amount in major units, rounding half-up
    /// (away from zero) to the minor unit.
    ///
    /// Returns `None` when the amount does not fit in an `i64` of minor units.
    ///
    /// ```rust
    /// use nubras_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::from_decimal(Decimal::new(10505, 3)).unwrap(); // 10.505
    /// assert_eq!(m.minor(), 1051);
    /// ```
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        amount
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Money)
    }

    /// Returns the amount as an exact decimal in major units.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps negative amounts to zero.
    ///
    /// ```rust
    /// use nubras_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(-300).clamp_non_negative(), Money::zero());
    /// assert_eq!(Money::from_minor(300).clamp_non_negative().minor(), 300);
    /// ```
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            Money(self.0)
        }
    }

    /// Calculates tax at the given rate, rounded half-up to the minor unit.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 is the
    /// half-unit that makes truncating division round half-up.
    ///
    /// ## Example
    /// ```rust
    /// use nubras_core::money::Money;
    /// use nubras_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_minor(1010); // 10.10
    /// let vat = subtotal.calculate_tax(TaxRate::VAT);
    /// // 10.10 × 5% = 0.505 → 0.51
    /// assert_eq!(vat.minor(), 51);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(round_bps(self.0, rate.bps()))
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use nubras_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(4500);
    /// assert_eq!(unit_price.multiply_quantity(3).minor(), 13_500);
    /// ```
    /// Saturates at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount with a currency code, e.g. `AED 1050.00`.
    pub fn display_with(&self, currency: &str) -> String {
        if currency.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", currency, self)
        }
    }
}

/// `amount × bps / 10000`, rounded half away from zero.
fn round_bps(amount: i64, bps: u32) -> i64 {
    // i128 prevents overflow on large amounts
    let product = amount as i128 * bps as i128;
    let rounded = if product < 0 {
        (product - 5000) / 10000
    } else {
        (product + 5000) / 10000
    };
    rounded as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Always two decimals, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Wire Format
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Two-decimal amounts are exactly representable for display purposes;
        // the API expects a plain JSON number.
        let value = self.to_decimal().to_f64().unwrap_or_default();
        serializer.serialize_f64(value)
    }
}

impl<'de> Deserialize<'de> for Money {
    /// `null` is read as zero, like a missing amount.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Option<Decimal> as Deserialize>::deserialize(deserializer)?.unwrap_or_default();
        Money::from_decimal(amount)
            .ok_or_else(|| D::Error::custom(format!("amount {} is out of range", amount)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display_always_two_decimals() {
        assert_eq!(Money::from_minor(1099).to_string(), "10.99");
        assert_eq!(Money::from_minor(500).to_string(), "5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::from_minor(0).to_string(), "0.00");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::from_major(1050).display_with("AED"), "AED 1050.00");
        assert_eq!(Money::from_major(7).display_with(""), "7.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((-a).minor(), -1000);
        let result: Money = a * 3;
        assert_eq!(result.minor(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.minor(), 2000);
    }

    #[test]
    fn test_vat_rounds_half_up() {
        // 1000.00 at 5% = 50.00
        assert_eq!(Money::from_major(1000).calculate_tax(TaxRate::VAT).minor(), 5000);
        // 0.10 at 5% = 0.005 → 0.01
        assert_eq!(Money::from_minor(10).calculate_tax(TaxRate::VAT).minor(), 1);
        // 0.09 at 5% = 0.0045 → 0.00
        assert_eq!(Money::from_minor(9).calculate_tax(TaxRate::VAT).minor(), 0);
    }

    #[test]
    fn test_negative_tax_rounds_away_from_zero() {
        assert_eq!(Money::from_minor(-10).calculate_tax(TaxRate::VAT).minor(), -1);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert!(Money::from_minor(-1).clamp_non_negative().is_zero());
        assert_eq!(Money::from_minor(850).clamp_non_negative().minor(), 850);
    }

    #[test]
    fn test_deserialize_from_json_numbers() {
        let m: Money = serde_json::from_str("1050").unwrap();
        assert_eq!(m.minor(), 105_000);

        let m: Money = serde_json::from_str("1050.5").unwrap();
        assert_eq!(m.minor(), 105_050);

        // Three-decimal amounts round half-up once, on arrival
        let m: Money = serde_json::from_str("0.125").unwrap();
        assert_eq!(m.minor(), 13);

        let m: Money = serde_json::from_str("\"42.10\"").unwrap();
        assert_eq!(m.minor(), 4210);
    }

    #[test]
    fn test_serialize_as_major_units() {
        let json = serde_json::to_string(&Money::from_minor(105_050)).unwrap();
        assert_eq!(json, "1050.5");
        let json = serde_json::to_string(&Money::from_major(200)).unwrap();
        assert_eq!(json, "200.0");
    }

    #[test]
    fn test_null_amount_reads_as_zero() {
        let m: Money = serde_json::from_str("null").unwrap();
        assert!(m.is_zero());

        #[derive(Deserialize)]
        struct Row {
            #[serde(default)]
            discount: Money,
        }
        let row: Row = serde_json::from_str(r#"{"discount": null}"#).unwrap();
        assert!(row.discount.is_zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let price = Money::from_minor(10);
        assert_eq!(price.multiply_quantity(i64::MAX).minor(), i64::MAX);
        assert_eq!(price.multiply_quantity(i64::MIN).minor(), i64::MIN);
        assert_eq!((Money::from_minor(i64::MAX) + price).minor(), i64::MAX);
        assert_eq!((Money::from_minor(i64::MIN) - price).minor(), i64::MIN);
        assert_eq!((-Money::from_minor(i64::MIN)).minor(), i64::MAX);

        let total: Money = [Money::from_minor(i64::MAX), price].iter().sum();
        assert_eq!(total.minor(), i64::MAX);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_minor(100).is_positive());
        assert!(Money::from_minor(-100).is_negative());
    }
}
