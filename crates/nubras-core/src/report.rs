//! # Reports
//!
//! Aggregations over the lists the API returns.
//!
//! ```text
//! ┌──────────────────┐   SalesSummary::from_orders(now)   ┌────────────────────┐
//! │ Vec<SalesOrder>  │ ─────────────────────────────────► │ counts per status  │
//! └──────────────────┘                                    │ revenue / balance  │
//!                                                         │ overdue / due soon │
//! ┌──────────────────┐   InventoryAlerts::from_items      └────────────────────┘
//! │ Vec<InventoryItem│ ─────────────────────────────────► out / low / reorder
//! └──────────────────┘
//! ```
//!
//! [`SalesOverview`] is different: it is computed by the server
//! (`GET /sales/overview`) and only deserialized here.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::inventory::{InventoryItem, StockStatus};
use crate::money::Money;
use crate::order::{OrderStatus, SalesOrder};

// =============================================================================
// Sales
// =============================================================================

/// Number of orders in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub draft: usize,
    pub confirmed: usize,
    pub processing: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub unknown: usize,
}

impl StatusCounts {
    fn record(&mut self, status: OrderStatus) {
        let slot = match status {
            OrderStatus::Draft => &mut self.draft,
            OrderStatus::Confirmed => &mut self.confirmed,
            OrderStatus::Processing => &mut self.processing,
            OrderStatus::Completed => &mut self.completed,
            OrderStatus::Cancelled => &mut self.cancelled,
            OrderStatus::Unknown => &mut self.unknown,
        };
        *slot += 1;
    }

    pub fn get(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Draft => self.draft,
            OrderStatus::Confirmed => self.confirmed,
            OrderStatus::Processing => self.processing,
            OrderStatus::Completed => self.completed,
            OrderStatus::Cancelled => self.cancelled,
            OrderStatus::Unknown => self.unknown,
        }
    }
}

/// Client-side summary of a list of orders.
///
/// Cancelled orders count towards `orders` and `by_status` only; they are
/// left out of every money figure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub orders: usize,
    pub by_status: StatusCounts,
    pub revenue: Money,
    pub collected: Money,
    pub outstanding: Money,
    pub overdue: usize,
    pub due_soon: usize,
}

impl SalesSummary {
    pub fn from_orders(orders: &[SalesOrder], now: DateTime<Utc>, window: Duration) -> Self {
        let mut summary = SalesSummary {
            orders: orders.len(),
            ..Default::default()
        };

        for order in orders {
            summary.by_status.record(order.status);

            if order.is_overdue(now) {
                summary.overdue += 1;
            }
            if order.is_due_soon_within(now, window) {
                summary.due_soon += 1;
            }

            if order.status == OrderStatus::Cancelled {
                continue;
            }
            summary.revenue += order.total_amount;
            summary.collected += order.amount_paid;
            summary.outstanding += order.outstanding();
        }

        summary
    }
}

/// Dashboard aggregates served by `GET /sales/overview`.
///
/// Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesOverview {
    pub total_orders: u64,
    pub total_revenue: Money,
    pub pending_amount: Money,
    pub completed_orders: u64,
    pub pending_orders: u64,
    pub overdue_orders: u64,
}

// =============================================================================
// Inventory
// =============================================================================

/// Items that need attention, each list sorted by name.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAlerts {
    pub out_of_stock: Vec<InventoryItem>,
    pub low_stock: Vec<InventoryItem>,
    /// Everything at or below its reorder point, regardless of status.
    pub reorder: Vec<InventoryItem>,
}

impl InventoryAlerts {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        let mut alerts = InventoryAlerts::default();

        for item in items {
            match item.stock_status() {
                StockStatus::OutOfStock => alerts.out_of_stock.push(item.clone()),
                StockStatus::LowStock => alerts.low_stock.push(item.clone()),
                StockStatus::InStock => {}
            }
            if item.needs_reorder() {
                alerts.reorder.push(item.clone());
            }
        }

        for list in [&mut alerts.out_of_stock, &mut alerts.low_stock, &mut alerts.reorder] {
            list.sort_by(|a, b| a.name.cmp(&b.name));
        }
        alerts
    }

    pub fn is_empty(&self) -> bool {
        self.out_of_stock.is_empty() && self.low_stock.is_empty() && self.reorder.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap()
    }

    fn order(status: &str, total: i64, paid: i64, due_in_days: i64) -> SalesOrder {
        let json = serde_json::json!({
            "id": "o",
            "status": status,
            "totalAmount": total,
            "amountPaid": paid,
            "amountPending": total - paid,
            "dueDate": (now() + Duration::days(due_in_days)).to_rfc3339(),
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_sales_summary() {
        let orders = vec![
            order("confirmed", 1050, 200, -2),  // overdue
            order("processing", 500, 0, 2),     // due soon
            order("completed", 300, 300, -10),  // neither
            order("cancelled", 900, 0, -1),     // excluded from money
            order("on-hold", 100, 100, 30),
        ];

        let s = SalesSummary::from_orders(&orders, now(), Duration::days(3));
        assert_eq!(s.orders, 5);
        assert_eq!(s.by_status.get(OrderStatus::Cancelled), 1);
        assert_eq!(s.by_status.unknown, 1);
        assert_eq!(s.revenue, Money::from_major(1950));
        assert_eq!(s.collected, Money::from_major(600));
        assert_eq!(s.outstanding, Money::from_major(1350));
        assert_eq!(s.overdue, 1);
        assert_eq!(s.due_soon, 1);
    }

    #[test]
    fn test_empty_summary() {
        let s = SalesSummary::from_orders(&[], now(), Duration::days(3));
        assert_eq!(s, SalesSummary::default());
    }

    #[test]
    fn test_overview_tolerates_missing_fields() {
        let o: SalesOverview = serde_json::from_str(r#"{"totalOrders":12,"totalRevenue":15400.5}"#).unwrap();
        assert_eq!(o.total_orders, 12);
        assert_eq!(o.total_revenue.minor(), 1_540_050);
        assert!(o.pending_amount.is_zero());
    }

    #[test]
    fn test_inventory_alerts() {
        let items: Vec<InventoryItem> = serde_json::from_value(serde_json::json!([
            {"id": "1", "name": "Silk", "stock": 0, "minStock": 5, "reorderPoint": 8},
            {"id": "2", "name": "Cotton", "stock": 3, "minStock": 5, "reorderPoint": 8},
            {"id": "3", "name": "Buttons", "stock": 7, "minStock": 5, "reorderPoint": 8},
            {"id": "4", "name": "Linen", "stock": 50, "minStock": 5, "reorderPoint": 8}
        ]))
        .unwrap();

        let alerts = InventoryAlerts::from_items(&items);
        assert_eq!(alerts.out_of_stock.len(), 1);
        assert_eq!(alerts.low_stock[0].name, "Cotton");
        let reorder: Vec<_> = alerts.reorder.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(reorder, vec!["Buttons", "Cotton", "Silk"]);
        assert!(!alerts.is_empty());
    }
}
