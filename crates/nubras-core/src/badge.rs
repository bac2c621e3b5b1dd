//! # Status Badges
//!
//! Total mapping from every status-like enum to a display label and tone.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────────────┐
//! │  OrderStatus::Draft  │ ─────► │ Badge { "Draft", Neutral }   │
//! │  Priority::Urgent    │ ─────► │ Badge { "Urgent", Danger }   │
//! │  <unknown literal>   │ ─────► │ Badge { "Unknown", Neutral } │
//! └──────────────────────┘        └──────────────────────────────┘
//! ```
//!
//! Unknown literals never fail; they render with [`Badge::UNKNOWN`].

use serde::Serialize;
use ts_rs::TS;

use crate::inventory::StockStatus;
use crate::order::OrderStatus;
use crate::quotation::QuotationStatus;
use crate::returns::{ItemCondition, ReturnStatus, ReturnType};
use crate::types::{PaymentStatus, Priority};

/// Visual weight of a badge. Front ends map these to colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl BadgeTone {
    /// CSS class used by the printable documents and the dashboard.
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeTone::Neutral => "badge-neutral",
            BadgeTone::Info => "badge-info",
            BadgeTone::Success => "badge-success",
            BadgeTone::Warning => "badge-warning",
            BadgeTone::Danger => "badge-danger",
        }
    }
}

/// A label plus tone, ready to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

impl Badge {
    /// Fallback for literals the client does not recognise.
    pub const UNKNOWN: Badge = Badge::new("Unknown", BadgeTone::Neutral);

    pub const OVERDUE: Badge = Badge::new("Overdue", BadgeTone::Danger);
    pub const DUE_SOON: Badge = Badge::new("Due Soon", BadgeTone::Warning);
    pub const EXPIRED: Badge = Badge::new("Expired", BadgeTone::Danger);

    pub const fn new(label: &'static str, tone: BadgeTone) -> Self {
        Badge { label, tone }
    }
}

/// Anything that renders as a status badge.
pub trait StatusBadge {
    fn badge(&self) -> Badge;
}

impl StatusBadge for OrderStatus {
    fn badge(&self) -> Badge {
        match self {
            OrderStatus::Draft => Badge::new("Draft", BadgeTone::Neutral),
            OrderStatus::Confirmed => Badge::new("Confirmed", BadgeTone::Info),
            OrderStatus::Processing => Badge::new("Processing", BadgeTone::Warning),
            OrderStatus::Completed => Badge::new("Completed", BadgeTone::Success),
            OrderStatus::Cancelled => Badge::new("Cancelled", BadgeTone::Danger),
            OrderStatus::Unknown => Badge::UNKNOWN,
        }
    }
}

impl StatusBadge for Priority {
    fn badge(&self) -> Badge {
        match self {
            Priority::Low => Badge::new("Low", BadgeTone::Neutral),
            Priority::Medium => Badge::new("Medium", BadgeTone::Info),
            Priority::High => Badge::new("High", BadgeTone::Warning),
            Priority::Urgent => Badge::new("Urgent", BadgeTone::Danger),
            Priority::Unknown => Badge::UNKNOWN,
        }
    }
}

impl StatusBadge for PaymentStatus {
    fn badge(&self) -> Badge {
        match self {
            PaymentStatus::Pending => Badge::new("Unpaid", BadgeTone::Danger),
            PaymentStatus::Partial => Badge::new("Partially Paid", BadgeTone::Warning),
            PaymentStatus::Paid => Badge::new("Paid", BadgeTone::Success),
            PaymentStatus::Refunded => Badge::new("Refunded", BadgeTone::Neutral),
            PaymentStatus::Unknown => Badge::UNKNOWN,
        }
    }
}

impl StatusBadge for QuotationStatus {
    fn badge(&self) -> Badge {
        match self {
            QuotationStatus::Draft => Badge::new("Draft", BadgeTone::Neutral),
            QuotationStatus::Sent => Badge::new("Sent", BadgeTone::Info),
            QuotationStatus::Accepted => Badge::new("Accepted", BadgeTone::Success),
            QuotationStatus::Rejected => Badge::new("Rejected", BadgeTone::Danger),
            QuotationStatus::Expired => Badge::EXPIRED,
            QuotationStatus::Converted => Badge::new("Converted", BadgeTone::Success),
            QuotationStatus::Unknown => Badge::UNKNOWN,
        }
    }
}

impl StatusBadge for ReturnStatus {
    fn badge(&self) -> Badge {
        match self {
            ReturnStatus::Pending => Badge::new("Pending", BadgeTone::Warning),
            ReturnStatus::Approved => Badge::new("Approved", BadgeTone::Info),
            ReturnStatus::Rejected => Badge::new("Rejected", BadgeTone::Danger),
            ReturnStatus::Completed => Badge::new("Completed", BadgeTone::Success),
            ReturnStatus::Unknown => Badge::UNKNOWN,
        }
    }
}

impl StatusBadge for ItemCondition {
    fn badge(&self) -> Badge {
        match self {
            ItemCondition::New => Badge::new("New", BadgeTone::Success),
            ItemCondition::Good => Badge::new("Good", BadgeTone::Info),
            ItemCondition::Damaged => Badge::new("Damaged", BadgeTone::Warning),
            ItemCondition::Defective => Badge::new("Defective", BadgeTone::Danger),
            ItemCondition::Unknown => Badge::UNKNOWN,
        }
    }
}

impl StatusBadge for ReturnType {
    fn badge(&self) -> Badge {
        match self {
            ReturnType::Refund => Badge::new("Refund", BadgeTone::Info),
            ReturnType::Exchange => Badge::new("Exchange", BadgeTone::Neutral),
            ReturnType::StoreCredit => Badge::new("Store Credit", BadgeTone::Success),
            ReturnType::Unknown => Badge::UNKNOWN,
        }
    }
}

impl StatusBadge for StockStatus {
    fn badge(&self) -> Badge {
        match self {
            StockStatus::InStock => Badge::new("In Stock", BadgeTone::Success),
            StockStatus::LowStock => Badge::new("Low Stock", BadgeTone::Warning),
            StockStatus::OutOfStock => Badge::new("Out of Stock", BadgeTone::Danger),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_labelled(badges: impl IntoIterator<Item = Badge>) {
        for badge in badges {
            assert!(!badge.label.is_empty());
            assert_ne!(badge, Badge::UNKNOWN, "known literal fell through to default");
        }
    }

    #[test]
    fn every_known_literal_has_a_label() {
        assert_labelled(OrderStatus::ALL.iter().map(|s| s.badge()));
        assert_labelled(Priority::ALL.iter().map(|s| s.badge()));
        assert_labelled(PaymentStatus::ALL.iter().map(|s| s.badge()));
        assert_labelled(QuotationStatus::ALL.iter().map(|s| s.badge()));
        assert_labelled(ReturnStatus::ALL.iter().map(|s| s.badge()));
        assert_labelled(ItemCondition::ALL.iter().map(|s| s.badge()));
        assert_labelled(ReturnType::ALL.iter().map(|s| s.badge()));
        assert_labelled(StockStatus::ALL.iter().map(|s| s.badge()));
    }

    #[test]
    fn unknown_literals_render_neutral_default() {
        let status: OrderStatus = serde_json::from_str("\"on-hold\"").unwrap();
        assert_eq!(status.badge(), Badge::UNKNOWN);
        assert_eq!(status.badge().tone, BadgeTone::Neutral);

        let status: QuotationStatus = serde_json::from_str("\"revised\"").unwrap();
        assert_eq!(status.badge().label, "Unknown");

        let condition: ItemCondition = serde_json::from_str("\"used\"").unwrap();
        assert_eq!(condition.badge(), Badge::UNKNOWN);
    }

    #[test]
    fn tones_map_to_css_classes() {
        assert_eq!(OrderStatus::Completed.badge().tone.css_class(), "badge-success");
        assert_eq!(Priority::Urgent.badge().tone.css_class(), "badge-danger");
    }
}
