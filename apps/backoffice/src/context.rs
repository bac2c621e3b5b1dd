//! State shared by every command of one invocation.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use nubras_client::{BackOfficeClient, BackOfficeConfig};

pub struct Context {
    pub config: BackOfficeConfig,
    /// `--config`, when given; `None` means the platform default.
    pub config_path: Option<PathBuf>,
    pub client: BackOfficeClient,
    pub json: bool,
    /// Reference instant for due-date and validity flags.
    pub now: DateTime<Utc>,
}

impl Context {
    pub fn load(config_path: Option<PathBuf>, json: bool) -> Result<Self> {
        let config = BackOfficeConfig::load(config_path.clone())
            .context("Failed to load back-office configuration (see `nubras config show`)")?;
        let client = BackOfficeClient::new(&config).map_err(|e| {
            if e.is_config_error() {
                anyhow::Error::new(e).context("Invalid API settings in the back-office configuration")
            } else {
                anyhow::Error::new(e).context("Failed to create API client")
            }
        })?;

        Ok(Self {
            config,
            config_path,
            client,
            json,
            now: Utc::now(),
        })
    }

    pub fn currency(&self) -> &str {
        &self.config.business.currency
    }

    /// Formats an amount with the configured currency code.
    pub fn money(&self, amount: nubras_core::Money) -> String {
        crate::output::money(amount, self.currency())
    }
}
