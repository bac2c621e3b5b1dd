//! # Commands
//!
//! One module per screen of the back office. Every handler follows the
//! same shape:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  handler(ctx, args)                                                     │
//! │     │                                                                   │
//! │     ├── ctx.client.<endpoint>()     fetch / mutate (nubras-client)      │
//! │     ├── nubras-core                 badges, flags, totals, guards       │
//! │     └── --json ? print_json : Table                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures from the API client are reduced to the operator-facing message
//! (`ClientError::user_message`); the full error goes to the log.

mod calendar;
mod directory;
mod inventory;
mod orders;
mod quotations;
mod returns;
mod session;
mod suppliers;

use anyhow::{anyhow, Result};
use nubras_client::ClientError;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::context::Context;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { config, json, command } = cli;

    // Config commands must work while the config itself is broken.
    let command = match command {
        Commands::Config(command) => return session::config(command, config, json),
        other => other,
    };

    let ctx = Context::load(config, json)?;

    match command {
        Commands::Orders(command) => orders::run(&ctx, command).await,
        Commands::Quotations(command) => quotations::run(&ctx, command).await,
        Commands::Returns(command) => returns::run(&ctx, command).await,
        Commands::Inventory(command) => inventory::run(&ctx, command).await,
        Commands::Suppliers(command) => suppliers::run(&ctx, command).await,
        Commands::Calendar(command) => calendar::run(&ctx, command).await,
        Commands::Customers(_) => directory::customers(&ctx).await,
        Commands::Staff(_) => directory::staff(&ctx).await,
        Commands::Login(args) => session::login(ctx, args).await,
        Commands::Config(_) => Ok(()),
    }
}

/// Converts a client failure into the message shown to the operator.
pub(crate) fn operator_error(error: ClientError) -> anyhow::Error {
    debug!(error = ?error, status = ?error.status(), "API call failed");
    anyhow!(error.user_message())
}
