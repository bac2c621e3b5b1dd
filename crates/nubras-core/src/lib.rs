//! # nubras-core: Pure Business Logic for the Al Nubras Back Office
//!
//! Every rule the back office applies to the data it receives from the
//! Al Nubras API lives here, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Al Nubras Back-Office Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    nubras (CLI, apps/backoffice)                │   │
//! │  │    orders ── quotations ── returns ── inventory ── calendar     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                nubras-client (HTTP + config)                    │   │
//! │  │    BackOfficeClient, ClientError, BackOfficeConfig              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ nubras-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  order    │  │   money   │  │   badge   │  │  invoice  │  │   │
//! │  │   │ quotation │  │  pricing  │  │  report   │  │ validation│  │   │
//! │  │   │  returns  │  │  TaxRate  │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic and decimal wire format
//! - [`types`] - Tax rate, priority, payment method and payment status
//! - [`pricing`] - Line items and totals
//! - [`order`] - Sales orders, due-date classification, payment guard
//! - [`quotation`] - Quotation lifecycle and validity
//! - [`returns`] - Return requests and refunds
//! - [`inventory`] - Stock levels and stock status
//! - [`party`] - Customers, staff and suppliers
//! - [`calendar`] - Fittings, deliveries and appointments
//! - [`dates`] - Lenient decoding of API date fields
//! - [`badge`] - Status → label/tone mapping
//! - [`report`] - Sales and inventory summaries
//! - [`invoice`] - Printable HTML invoices and quotations
//! - [`validation`] - Field rules for outgoing requests
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use nubras_core::{LineItem, Money, TaxRate, Totals};
//!
//! let items = vec![LineItem::new("Kandura", 3, Money::from_major(350))];
//! let totals = Totals::compute(&items, TaxRate::VAT, Money::zero());
//!
//! // 1050.00 + 5% VAT
//! assert_eq!(totals.tax.to_string(), "52.50");
//! assert_eq!(totals.total.to_string(), "1102.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod badge;
pub mod calendar;
pub mod dates;
pub mod error;
pub mod inventory;
pub mod invoice;
pub mod money;
pub mod order;
pub mod party;
pub mod pricing;
pub mod quotation;
pub mod report;
pub mod returns;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use badge::{Badge, BadgeTone, StatusBadge};
pub use calendar::{CalendarEvent, EventType};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{InventoryItem, StockStatus};
pub use invoice::{BusinessProfile, RenderOptions};
pub use money::Money;
pub use order::{Discrepancy, OrderStatus, SalesOrder, TransactionRequest, DUE_SOON_WINDOW_DAYS};
pub use party::{Customer, CustomerSummary, Staff, Supplier};
pub use pricing::{LineItem, Totals};
pub use quotation::{Quotation, QuotationStatus};
pub use report::{InventoryAlerts, SalesOverview, SalesSummary};
pub use returns::{ItemCondition, ReturnItem, ReturnRequest, ReturnStatus, ReturnType};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when none is configured.
pub const DEFAULT_CURRENCY: &str = "AED";

