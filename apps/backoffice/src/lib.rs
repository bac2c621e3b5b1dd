//! # Al Nubras Back-Office Library
//!
//! Everything behind the `nubras` binary. `main.rs` only parses arguments
//! and calls [`run`].
//!
//! ## Module Organization
//! ```text
//! nubras_backoffice/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions and value parsers
//! ├── context.rs      ◄─── Loaded config + API client for one invocation
//! ├── output.rs       ◄─── Tables, badges, JSON
//! ├── print.rs        ◄─── Writing and opening printable HTML
//! └── commands/
//!     ├── mod.rs      ◄─── Command dispatch
//!     ├── orders.rs   ◄─── Sales orders, payments, invoices
//!     ├── quotations.rs
//!     ├── returns.rs
//!     ├── inventory.rs
//!     ├── suppliers.rs
//!     ├── calendar.rs
//!     ├── directory.rs◄─── Customers and staff
//!     └── session.rs  ◄─── Login and config file
//! ```
//!
//! ## Where the rules live
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  commands/*  ──► nubras-client (HTTP, config) ──► REST API              │
//! │      │                                                                  │
//! │      └────────► nubras-core (badges, totals, guards, invoice HTML)      │
//! │                                                                         │
//! │  A command never computes a business rule itself. It fetches, asks      │
//! │  nubras-core, and renders.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
mod commands;
mod context;
mod output;
mod print;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Runs one `nubras` invocation.
///
/// ## Startup Sequence
/// 1. Initialize logging (stderr, so `--json` output stays clean)
/// 2. Handle `config` commands, which must work without a valid config
/// 3. Load configuration and build the API client
/// 4. Dispatch the command
pub async fn run(cli: Cli) -> Result<()> {
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting nubras");

    commands::dispatch(cli).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show request-level detail
/// - `RUST_LOG=nubras_client=trace` - Trace the HTTP layer only
/// - Default: INFO for the nubras crates, warnings elsewhere
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,nubras=info"));

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
