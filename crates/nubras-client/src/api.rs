//! # Back-Office API
//!
//! One method per endpoint. Mutations run the matching client-side guard
//! from nubras-core before anything is sent.
//!
//! ```text
//! ┌────────────────┬──────────────────────────────┬──────────────────────────┐
//! │ Area           │ Endpoint                     │ Guard                    │
//! ├────────────────┼──────────────────────────────┼──────────────────────────┤
//! │ Calendar       │ GET/POST /calendar           │ title, end ≥ start       │
//! │ Inventory      │ GET /inventory[/:id]         │ id                       │
//! │                │ PATCH /inventory/:id         │ non-negative levels      │
//! │ Suppliers      │ GET/POST /suppliers          │ name, email              │
//! │                │ DELETE /suppliers/:id        │ id                       │
//! │ Sales          │ GET /sales[/:id]             │ id                       │
//! │                │ GET /sales/overview          │                          │
//! │                │ POST /transactions           │ 0 < amount ≤ pending     │
//! │ Quotations     │ GET /quotations[/:id]        │ id                       │
//! │ Returns        │ GET /returns[/:id]           │ id                       │
//! │                │ PATCH /returns/:id/reject    │ status is pending        │
//! │ Customers/Staff│ GET /customers, GET /staff   │                          │
//! │ Auth           │ POST /auth/login             │                          │
//! └────────────────┴──────────────────────────────┴──────────────────────────┘
//! ```
//!
//! Guards compare against the copy the client holds. Concurrent
//! mutations from other sessions are not detected (last write wins).

use nubras_core::validation::validate_resource_id;
use nubras_core::{
    CalendarEvent, Customer, InventoryItem, Money, PaymentMethod, Quotation, ReturnRequest,
    ReturnStatus, SalesOrder, SalesOverview, Staff, Supplier, TransactionRequest,
};
use reqwest::Method;
use tracing::{info, warn};

use crate::config::BackOfficeConfig;
use crate::error::ClientResult;
use crate::http::{decode, session_cookie_from, HttpClient};
use crate::requests::{
    InventoryUpdate, LoginOutcome, LoginRequest, NewCalendarEvent, NewSupplier, RejectReturn,
};

/// `{prefix}/{id}` after checking the id is safe to put in a path.
fn resource_path(prefix: &str, id: &str) -> ClientResult<String> {
    validate_resource_id(id)?;
    Ok(format!("{}/{}", prefix, id))
}

#[derive(Debug, Clone)]
pub struct BackOfficeClient {
    http: HttpClient,
}

impl BackOfficeClient {
    pub fn new(config: &BackOfficeConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // =========================================================================
    // Calendar
    // =========================================================================

    pub async fn list_calendar_events(&self) -> ClientResult<Vec<CalendarEvent>> {
        self.http.get("/calendar").await
    }

    pub async fn create_calendar_event(&self, event: &NewCalendarEvent) -> ClientResult<CalendarEvent> {
        event.validate()?;
        let created: CalendarEvent = self.http.post("/calendar", event).await?;
        info!(event_id = %created.id, title = %created.title, "Calendar event created");
        Ok(created)
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    pub async fn list_inventory(&self) -> ClientResult<Vec<InventoryItem>> {
        self.http.get("/inventory").await
    }

    pub async fn get_inventory_item(&self, id: &str) -> ClientResult<InventoryItem> {
        self.http.get(&resource_path("/inventory", id)?).await
    }

    /// Patches an item. If the server does not echo the item back, it is
    /// fetched again.
    pub async fn update_inventory_item(&self, id: &str, update: &InventoryUpdate) -> ClientResult<InventoryItem> {
        let path = resource_path("/inventory", id)?;
        update.validate()?;

        let raw = self.http.send_raw(Method::PATCH, &path, Some(update)).await?;
        info!(item_id = %id, ?update, "Inventory item updated");

        match decode::<InventoryItem>(&raw.body) {
            Ok(item) => Ok(item),
            Err(_) => self.http.get(&path).await,
        }
    }

    // =========================================================================
    // Suppliers
    // =========================================================================

    pub async fn list_suppliers(&self) -> ClientResult<Vec<Supplier>> {
        self.http.get("/suppliers").await
    }

    pub async fn create_supplier(&self, supplier: &NewSupplier) -> ClientResult<Supplier> {
        supplier.validate()?;
        let created: Supplier = self.http.post("/suppliers", supplier).await?;
        info!(supplier_id = %created.id, name = %created.name, "Supplier created");
        Ok(created)
    }

    pub async fn delete_supplier(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&resource_path("/suppliers", id)?).await?;
        info!(supplier_id = %id, "Supplier deleted");
        Ok(())
    }

    // =========================================================================
    // Sales
    // =========================================================================

    pub async fn list_sales_orders(&self) -> ClientResult<Vec<SalesOrder>> {
        self.http.get("/sales").await
    }

    pub async fn get_sales_order(&self, id: &str) -> ClientResult<SalesOrder> {
        self.http.get(&resource_path("/sales", id)?).await
    }

    pub async fn sales_overview(&self) -> ClientResult<SalesOverview> {
        self.http.get("/sales/overview").await
    }

    /// Records a payment against `order` as the client last saw it.
    ///
    /// Rejected locally when `amount` is not positive or exceeds the
    /// order's `amountPending`. Returns whatever the server sends back.
    pub async fn record_transaction(
        &self,
        order: &SalesOrder,
        payment_method: PaymentMethod,
        amount: Money,
    ) -> ClientResult<serde_json::Value> {
        validate_resource_id(&order.id)?;
        let request = TransactionRequest::for_order(order, payment_method, amount)?;

        let receipt = self.http.post("/transactions", &request).await?;
        info!(
            order_id = %order.id,
            amount = %amount,
            method = payment_method.label(),
            "Payment recorded"
        );
        Ok(receipt)
    }

    /// Fetches the order, then records the payment against that copy.
    pub async fn pay_order(
        &self,
        order_id: &str,
        payment_method: PaymentMethod,
        amount: Money,
    ) -> ClientResult<serde_json::Value> {
        let order = self.get_sales_order(order_id).await?;
        self.record_transaction(&order, payment_method, amount).await
    }

    // =========================================================================
    // Quotations
    // =========================================================================

    pub async fn list_quotations(&self) -> ClientResult<Vec<Quotation>> {
        self.http.get("/quotations").await
    }

    pub async fn get_quotation(&self, id: &str) -> ClientResult<Quotation> {
        self.http.get(&resource_path("/quotations", id)?).await
    }

    // =========================================================================
    // Returns
    // =========================================================================

    pub async fn list_returns(&self) -> ClientResult<Vec<ReturnRequest>> {
        self.http.get("/returns").await
    }

    pub async fn get_return(&self, id: &str) -> ClientResult<ReturnRequest> {
        self.http.get(&resource_path("/returns", id)?).await
    }

    /// Rejects a pending return.
    ///
    /// The return is fetched first and only a pending one is sent on. If
    /// the server does not echo the updated return, the local copy is
    /// moved to rejected instead.
    pub async fn reject_return(&self, id: &str, reason: &str) -> ClientResult<ReturnRequest> {
        let body = RejectReturn::new(reason)?;
        let mut current = self.get_return(id).await?;
        current.ensure_can_reject()?;

        let path = format!("{}/reject", resource_path("/returns", id)?);
        let raw = self.http.send_raw(Method::PATCH, &path, Some(&body)).await?;
        info!(return_id = %id, "Return rejected");

        match decode::<ReturnRequest>(&raw.body) {
            Ok(updated) => {
                if updated.status != ReturnStatus::Rejected {
                    warn!(return_id = %id, status = updated.status.as_str(), "Server returned unexpected status after reject");
                }
                Ok(updated)
            }
            Err(_) => {
                current.transition_to(ReturnStatus::Rejected)?;
                current.rejection_reason = Some(body.reason);
                Ok(current)
            }
        }
    }

    // =========================================================================
    // Customers & Staff
    // =========================================================================

    pub async fn list_customers(&self) -> ClientResult<Vec<Customer>> {
        self.http.get("/customers").await
    }

    pub async fn list_staff(&self) -> ClientResult<Vec<Staff>> {
        self.http.get("/staff").await
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Logs in. The session cookie lands in this client's cookie store and
    /// is also returned so it can be saved to the config.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginOutcome> {
        let request = LoginRequest { email, password };
        let raw = self.http.send_raw(Method::POST, "/auth/login", Some(&request)).await?;

        let mut outcome = decode::<LoginOutcome>(&raw.body).unwrap_or_default();
        outcome.session_cookie = session_cookie_from(&raw.headers);
        info!(email, has_cookie = outcome.session_cookie.is_some(), "Logged in");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_resource_path_validates_id() {
        assert_eq!(resource_path("/sales", "o1").unwrap(), "/sales/o1");
        assert!(matches!(
            resource_path("/sales", "../staff"),
            Err(ClientError::Core(_))
        ));
    }
}
