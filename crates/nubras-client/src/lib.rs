//! # nubras-client: REST Client for the Al Nubras Back Office
//!
//! Typed access to the back-office API, with layered configuration.
//!
//! ## Modules
//!
//! - [`config`] - `BackOfficeConfig` (defaults → TOML → environment)
//! - [`http`] - Transport: cookies, timeout, request ids, envelopes, status mapping
//! - [`api`] - `BackOfficeClient`, one method per endpoint
//! - [`requests`] - Request bodies and their pre-flight checks
//! - [`error`] - `ClientError`
//!
//! ## Example
//! ```rust,no_run
//! use nubras_client::{BackOfficeClient, BackOfficeConfig};
//!
//! # async fn run() -> nubras_client::ClientResult<()> {
//! let config = BackOfficeConfig::load(None)?;
//! let client = BackOfficeClient::new(&config)?;
//!
//! for order in client.list_sales_orders().await? {
//!     println!("{} {}", order.display_number(), order.total_amount);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod requests;

pub use api::BackOfficeClient;
pub use config::BackOfficeConfig;
pub use error::{ClientError, ClientResult};
pub use requests::{InventoryUpdate, LoginOutcome, NewCalendarEvent, NewSupplier, RejectReturn};
