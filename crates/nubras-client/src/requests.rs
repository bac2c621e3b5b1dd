//! Request bodies sent to the API, each with its own pre-flight checks.

use chrono::{DateTime, Utc};
use nubras_core::validation::{validate_email, validate_name, validate_price, validate_reason, validate_resource_id, validate_stock_level};
use nubras_core::{EventType, Money, ValidationError};
use serde::{Deserialize, Serialize};

/// Body of `POST /suppliers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl NewSupplier {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("name", &self.name)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Body of `POST /calendar`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewCalendarEvent {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("title", &self.title)?;
        if let Some(end) = self.end {
            if end < self.start {
                return Err(ValidationError::InvalidFormat {
                    field: "end".to_string(),
                    reason: "must not be before start".to_string(),
                });
            }
        }
        if let Some(order_id) = &self.order_id {
            validate_resource_id(order_id)?;
        }
        Ok(())
    }
}

/// Body of `PATCH /inventory/:id`. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_point: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Money>,
}

impl InventoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.stock.is_none() && self.min_stock.is_none() && self.reorder_point.is_none() && self.unit_price.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::Required {
                field: "stock, minStock, reorderPoint or unitPrice".to_string(),
            });
        }
        let levels = [
            ("stock", self.stock),
            ("minStock", self.min_stock),
            ("reorderPoint", self.reorder_point),
        ];
        for (field, level) in levels {
            if let Some(level) = level {
                validate_stock_level(field, level)?;
            }
        }
        if let Some(price) = self.unit_price {
            validate_price(price)?;
        }
        Ok(())
    }
}

/// Body of `PATCH /returns/:id/reject`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectReturn {
    pub reason: String,
}

impl RejectReturn {
    /// Trims and checks the reason.
    pub fn new(reason: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            reason: validate_reason(reason)?,
        })
    }
}

/// Body of `POST /auth/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Result of a successful login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginOutcome {
    /// User record returned by the server, when it sent one.
    #[serde(default)]
    pub user: Option<serde_json::Value>,

    /// `Cookie` header value built from the response's `Set-Cookie`s.
    #[serde(skip)]
    pub session_cookie: Option<String>,
}
