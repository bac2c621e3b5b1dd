//! # Customers, Staff and Suppliers
//!
//! Flat contact records. Display aggregates (`totalSpent`, `restockCount`,
//! …) are computed by the API and trusted as received.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// The customer block embedded in orders and quotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_spent: Money,
}

impl Customer {
    pub fn summary(&self) -> CustomerSummary {
        CustomerSummary {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub restock_count: u32,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_from_api_json() {
        let c: Customer = serde_json::from_str(
            r#"{"_id":"c1","name":"Saeed","phone":"+971500000000","totalOrders":4,"totalSpent":2310.75}"#,
        )
        .unwrap();
        assert_eq!(c.id, "c1");
        assert_eq!(c.total_spent.minor(), 231_075);
        assert_eq!(c.summary().name, "Saeed");
    }

    #[test]
    fn test_staff_defaults_to_active() {
        let s: Staff = serde_json::from_str(r#"{"id":"s1","name":"Rashid","role":"tailor"}"#).unwrap();
        assert!(s.active);
    }
}
