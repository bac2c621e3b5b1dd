//! # Quotations
//!
//! ## Lifecycle
//! ```text
//!                        ┌──► accepted ──► converted
//!                        │
//!   draft ──► sent ──────┼──► rejected
//!                        │
//!                        └──► expired
//! ```
//! There are no back-transitions. A quotation whose `validUntil` has passed
//! while still open is *flagged* expired for display; its stored status is
//! left for the API to change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::badge::{Badge, StatusBadge};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::party::CustomerSummary;
use crate::pricing::{LineItem, Totals};
use crate::types::TaxRate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
    Converted,
    #[serde(other)]
    Unknown,
}

impl QuotationStatus {
    pub const ALL: [QuotationStatus; 6] = [
        QuotationStatus::Draft,
        QuotationStatus::Sent,
        QuotationStatus::Accepted,
        QuotationStatus::Rejected,
        QuotationStatus::Expired,
        QuotationStatus::Converted,
    ];

    pub fn can_transition_to(&self, next: QuotationStatus) -> bool {
        matches!(
            (self, next),
            (QuotationStatus::Draft, QuotationStatus::Sent)
                | (QuotationStatus::Sent, QuotationStatus::Accepted)
                | (QuotationStatus::Sent, QuotationStatus::Rejected)
                | (QuotationStatus::Sent, QuotationStatus::Expired)
                | (QuotationStatus::Accepted, QuotationStatus::Converted)
        )
    }

    /// Still awaiting a customer decision.
    pub fn is_open(&self) -> bool {
        matches!(self, QuotationStatus::Draft | QuotationStatus::Sent)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "draft",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
            QuotationStatus::Expired => "expired",
            QuotationStatus::Converted => "converted",
            QuotationStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotation_number: Option<String>,

    #[serde(default)]
    pub status: QuotationStatus,

    #[serde(default, deserialize_with = "crate::dates::deserialize_optional_datetime")]
    #[ts(as = "Option<String>")]
    pub valid_until: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSummary>,

    #[serde(default)]
    pub items: Vec<LineItem>,

    #[serde(default)]
    pub subtotal: Money,
    #[serde(default)]
    pub discount: Money,
    #[serde(default)]
    pub tax: Money,
    #[serde(default)]
    pub total: Money,

    /// Id of the sales order this quotation became.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_to_sale: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, deserialize_with = "crate::dates::deserialize_optional_datetime")]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quotation {
    pub fn display_number(&self) -> &str {
        self.quotation_number.as_deref().unwrap_or(&self.id)
    }

    /// Open (draft or sent) and `validUntil` is in the past.
    ///
    /// Display only: the stored status is not changed.
    pub fn is_past_validity(&self, now: DateTime<Utc>) -> bool {
        self.status.is_open() && self.valid_until.is_some_and(|until| until < now)
    }

    /// Stored status badge, followed by an "Expired" flag when the
    /// validity window has lapsed.
    pub fn display_badges(&self, now: DateTime<Utc>) -> Vec<Badge> {
        let mut badges = vec![self.status.badge()];
        if self.is_past_validity(now) {
            badges.push(Badge::EXPIRED);
        }
        badges
    }

    /// Totals recomputed from the items at `rate`, keeping the stored discount.
    pub fn recomputed_totals(&self, rate: TaxRate) -> Totals {
        Totals::compute(&self.items, rate, self.discount)
    }

    /// Applies a lifecycle transition to this copy.
    pub fn transition_to(&mut self, next: QuotationStatus) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity: "Quotation",
                id: self.display_number().to_string(),
                from: self.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Marks the quotation converted into `sale_id`.
    pub fn convert_to_sale(&mut self, sale_id: impl Into<String>) -> CoreResult<()> {
        self.transition_to(QuotationStatus::Converted)?;
        self.converted_to_sale = Some(sale_id.into());
        Ok(())
    }
}
