//! # nubras: Al Nubras Back-Office CLI
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr)
//! 3. Load configuration (defaults → TOML → environment)
//! 4. Run the command
//!
//! The setup lives in lib.rs so it can be tested.

use clap::Parser;
use nubras_backoffice::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nubras_backoffice::run(Cli::parse()).await
}
