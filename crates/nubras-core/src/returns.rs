//! # Return Requests
//!
//! ## Lifecycle
//! ```text
//!              ┌──► approved ──► completed
//!   pending ───┤
//!              └──► rejected
//! ```
//! `totalRefundAmount` is always the sum of the item refunds; it is derived
//! here rather than read from the payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ReturnStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
    #[serde(other)]
    Unknown,
}

impl ReturnStatus {
    pub const ALL: [ReturnStatus; 4] = [
        ReturnStatus::Pending,
        ReturnStatus::Approved,
        ReturnStatus::Rejected,
        ReturnStatus::Completed,
    ];

    pub fn can_transition_to(&self, next: ReturnStatus) -> bool {
        matches!(
            (self, next),
            (ReturnStatus::Pending, ReturnStatus::Approved)
                | (ReturnStatus::Pending, ReturnStatus::Rejected)
                | (ReturnStatus::Approved, ReturnStatus::Completed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnStatus::Pending => "pending",
            ReturnStatus::Approved => "approved",
            ReturnStatus::Rejected => "rejected",
            ReturnStatus::Completed => "completed",
            ReturnStatus::Unknown => "unknown",
        }
    }
}

/// Condition of a returned item as inspected in store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ItemCondition {
    New,
    #[default]
    Good,
    Damaged,
    Defective,
    #[serde(other)]
    Unknown,
}

impl ItemCondition {
    pub const ALL: [ItemCondition; 4] = [
        ItemCondition::New,
        ItemCondition::Good,
        ItemCondition::Damaged,
        ItemCondition::Defective,
    ];
}

/// What the customer receives for the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnType {
    #[default]
    Refund,
    Exchange,
    StoreCredit,
    #[serde(other)]
    Unknown,
}

impl ReturnType {
    pub const ALL: [ReturnType; 3] = [ReturnType::Refund, ReturnType::Exchange, ReturnType::StoreCredit];
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReturnItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(default, alias = "productName")]
    pub name: String,

    #[serde(alias = "qty")]
    pub quantity: i64,

    #[serde(default)]
    pub original_total: Money,

    #[serde(default)]
    pub refund_amount: Money,

    #[serde(default)]
    pub condition: ItemCondition,

    #[serde(rename = "type", default)]
    pub return_type: ReturnType,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(default)]
    pub status: ReturnStatus,

    #[serde(default)]
    pub items: Vec<ReturnItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,

    #[serde(default, deserialize_with = "crate::dates::deserialize_optional_datetime")]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ReturnRequest {
    pub fn display_number(&self) -> &str {
        self.return_number.as_deref().unwrap_or(&self.id)
    }

    /// Σ item.refundAmount.
    pub fn total_refund_amount(&self) -> Money {
        self.items.iter().map(|item| item.refund_amount).sum()
    }

    /// Σ item.originalTotal.
    pub fn total_original_amount(&self) -> Money {
        self.items.iter().map(|item| item.original_total).sum()
    }

    /// Checks that no item refunds more than it originally cost.
    pub fn check_refunds(&self) -> CoreResult<()> {
        for item in &self.items {
            if item.refund_amount > item.original_total {
                return Err(CoreError::RefundExceedsOriginal {
                    item: item.name.clone(),
                    refund: item.refund_amount,
                    original: item.original_total,
                });
            }
        }
        Ok(())
    }

    fn ensure_transition(&self, next: ReturnStatus) -> CoreResult<()> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                entity: "Return",
                id: self.display_number().to_string(),
                from: self.status.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }

    /// Guard for `PATCH /returns/:id/reject`: only pending returns.
    pub fn ensure_can_reject(&self) -> CoreResult<()> {
        self.ensure_transition(ReturnStatus::Rejected)
    }

    /// Applies a lifecycle transition to this copy.
    pub fn transition_to(&mut self, next: ReturnStatus) -> CoreResult<()> {
        self.ensure_transition(next)?;
        self.status = next;
        Ok(())
    }
}
