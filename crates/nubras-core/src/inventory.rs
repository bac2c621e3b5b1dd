//! # Inventory
//!
//! Stock levels and the status derived from them.
//!
//! ```text
//!   stock ≤ 0             → out-of-stock
//!   0 < stock ≤ minStock  → low-stock
//!   stock > minStock      → in-stock
//!
//!   stock ≤ reorderPoint  → needs reorder (independent of the above)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [
        StockStatus::InStock,
        StockStatus::LowStock,
        StockStatus::OutOfStock,
    ];

    pub fn derive(stock: i64, min_stock: i64) -> Self {
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock <= min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// A stocked material or product (fabric, thread, ready-made garments).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Unit of measure (`m`, `pcs`, `roll`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default)]
    pub stock: i64,

    #[serde(default)]
    pub min_stock: i64,

    #[serde(default)]
    pub reorder_point: i64,

    #[serde(default)]
    pub unit_price: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
}

impl InventoryItem {
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::derive(self.stock, self.min_stock)
    }

    pub fn needs_reorder(&self) -> bool {
        self.stock <= self.reorder_point
    }

    /// Value of the stock on hand at unit price.
    pub fn stock_value(&self) -> Money {
        self.unit_price.multiply_quantity(self.stock.max(0))
    }
}
