//! # Pricing
//!
//! Line items and the totals derived from them.
//!
//! ```text
//! items ──► subtotal = Σ quantity × price
//!               │
//!               ├──► tax = subtotal × rate   (half-up, minor units)
//!               │
//!               └──► total = subtotal + tax − discount
//! ```
//!
//! Orders and quotations share [`LineItem`]; both compute totals here so
//! there is exactly one rounding policy in the system.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::TaxRate;

/// One priced line on an order or quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, alias = "productName")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tailoring measurements note (chest, sleeve, length...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<String>,

    pub quantity: i64,

    /// Unit price. The dashboard sends `price`; some screens send `unitPrice`.
    #[serde(alias = "unitPrice")]
    pub price: Money,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: i64, price: Money) -> Self {
        LineItem {
            name: name.into(),
            description: None,
            measurements: None,
            quantity,
            price,
        }
    }

    /// `quantity × price`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// Σ quantity × price over the lines.
pub fn subtotal(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::line_total).sum()
}

/// Derived totals for a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
}

impl Totals {
    /// Computes totals for `items` at `rate`, less a flat `discount`.
    ///
    /// Tax is charged on the pre-discount subtotal, matching how the
    /// dashboard has always computed it.
    ///
    /// ```rust
    /// use nubras_core::{LineItem, Money, TaxRate, Totals};
    ///
    /// let items = vec![
    ///     LineItem::new("Kandura", 2, Money::from_major(350)),
    ///     LineItem::new("Alteration", 1, Money::from_major(300)),
    /// ];
    /// let totals = Totals::compute(&items, TaxRate::VAT, Money::zero());
    /// assert_eq!(totals.subtotal, Money::from_major(1000));
    /// assert_eq!(totals.tax, Money::from_major(50));
    /// assert_eq!(totals.total, Money::from_major(1050));
    /// ```
    pub fn compute(items: &[LineItem], rate: TaxRate, discount: Money) -> Self {
        Self::from_subtotal(subtotal(items), rate, discount)
    }

    /// Same as [`Totals::compute`] for an already known subtotal.
    pub fn from_subtotal(subtotal: Money, rate: TaxRate, discount: Money) -> Self {
        let tax = subtotal.calculate_tax(rate);
        Totals {
            subtotal,
            tax,
            discount,
            total: subtotal + tax - discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: i64, price_minor: i64) -> LineItem {
        LineItem::new("item", qty, Money::from_minor(price_minor))
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        let items = vec![line(2, 1250), line(3, 999), line(0, 50_000)];
        assert_eq!(subtotal(&items).minor(), 2 * 1250 + 3 * 999);
        assert_eq!(subtotal(&[]), Money::zero());
    }

    #[test]
    fn test_tax_is_five_percent_rounded_to_two_places() {
        // 20.10 × 5% = 1.005 → 1.01
        let totals = Totals::compute(&[line(1, 2010)], TaxRate::VAT, Money::zero());
        assert_eq!(totals.tax.minor(), 101);
        assert_eq!(totals.total.minor(), 2111);

        // 20.09 × 5% = 1.0045 → 1.00
        let totals = Totals::compute(&[line(1, 2009)], TaxRate::VAT, Money::zero());
        assert_eq!(totals.tax.minor(), 100);
    }

    #[test]
    fn test_discount_is_subtracted_after_tax() {
        let totals = Totals::compute(&[line(4, 25_000)], TaxRate::VAT, Money::from_major(100));
        assert_eq!(totals.subtotal, Money::from_major(1000));
        assert_eq!(totals.tax, Money::from_major(50));
        assert_eq!(totals.total, Money::from_major(950));
    }

    #[test]
    fn test_zero_rate() {
        let totals = Totals::compute(&[line(1, 1000)], TaxRate::zero(), Money::zero());
        assert!(totals.tax.is_zero());
        assert_eq!(totals.total.minor(), 1000);
    }

    #[test]
    fn test_line_item_accepts_unit_price_alias() {
        let item: LineItem =
            serde_json::from_str(r#"{"name":"Abaya","quantity":2,"unitPrice":420.5}"#).unwrap();
        assert_eq!(item.price.minor(), 42_050);
        assert_eq!(item.line_total().minor(), 84_100);
    }

    #[test]
    fn test_line_total_saturates_on_huge_quantity() {
        let item = LineItem::new("Fabric", i64::MAX, Money::from_minor(10));
        assert_eq!(item.line_total(), Money::from_minor(i64::MAX));
        assert_eq!(subtotal(&[item.clone(), item]), Money::from_minor(i64::MAX));
    }
}
