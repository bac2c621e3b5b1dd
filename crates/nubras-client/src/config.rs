//! # Back-Office Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     NUBRAS_API_URL=https://staging.alnubras.co/api/v1                  │
//! │     NUBRAS_TAX_RATE_BPS=500                                            │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform config dir)            │
//! │     ~/.config/backoffice/backoffice.toml (Linux)                       │
//! │     ~/Library/Application Support/ae.alnubras.backoffice/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     production API, 30 s timeout, 5% VAT                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # backoffice.toml
//! [api]
//! base_url = "https://api.alnubras.co/api/v1"
//! timeout_secs = 30
//! # session_cookie = "connect.sid=..."
//!
//! [billing]
//! tax_rate_bps = 500     # 5% VAT
//! due_soon_days = 3
//! auto_print = true
//!
//! [business]
//! name = "Al Nubras"
//! currency = "AED"
//! trn = "100200300400003"
//! ```

use nubras_core::validation::validate_tax_rate_bps;
use nubras_core::{BusinessProfile, RenderOptions, TaxRate, DUE_SOON_WINDOW_DAYS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Production API.
pub const DEFAULT_API_URL: &str = "https://api.alnubras.co/api/v1";

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "backoffice.toml";

/// Upper bound for `billing.due_soon_days` (ten years).
pub const MAX_DUE_SOON_DAYS: i64 = 3650;

// =============================================================================
// Sections
// =============================================================================

/// `[api]`: where and how to reach the back-office API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Whole-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Raw `Cookie` header value sent with every request, for sessions
    /// established outside the CLI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            session_cookie: None,
        }
    }
}

/// `[billing]`: tax and classification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingSettings {
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Window for the "due soon" flag, in days.
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,

    /// Printed documents open the print dialog on load.
    #[serde(default = "default_true")]
    pub auto_print: bool,
}

fn default_tax_rate_bps() -> u32 {
    TaxRate::VAT.bps()
}

fn default_due_soon_days() -> i64 {
    DUE_SOON_WINDOW_DAYS
}

fn default_true() -> bool {
    true
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            tax_rate_bps: default_tax_rate_bps(),
            due_soon_days: default_due_soon_days(),
            auto_print: true,
        }
    }
}

// =============================================================================
// Back-Office Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackOfficeConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub billing: BillingSettings,

    /// Letterhead printed on invoices and quotations.
    #[serde(default)]
    pub business: BusinessProfile,
}

impl BackOfficeConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (backoffice.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading back-office config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load back-office config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file and returns the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Back-office config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        self.api_url()?;

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }

        validate_tax_rate_bps(self.billing.tax_rate_bps)
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        if !(0..=MAX_DUE_SOON_DAYS).contains(&self.billing.due_soon_days) {
            return Err(ClientError::InvalidConfig(format!(
                "billing.due_soon_days must be between 0 and {}",
                MAX_DUE_SOON_DAYS
            )));
        }

        if self.business.currency.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "business.currency must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable numbers are
    /// logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("NUBRAS_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("NUBRAS_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid NUBRAS_API_TIMEOUT_SECS"),
            }
        }

        if let Some(cookie) = lookup("NUBRAS_SESSION_COOKIE") {
            debug!("Using session cookie from environment");
            self.api.session_cookie = Some(cookie);
        }

        if let Some(bps) = lookup("NUBRAS_TAX_RATE_BPS") {
            match bps.parse::<u32>() {
                Ok(bps) => self.billing.tax_rate_bps = bps,
                Err(_) => warn!(value = %bps, "Ignoring invalid NUBRAS_TAX_RATE_BPS"),
            }
        }

        if let Some(days) = lookup("NUBRAS_DUE_SOON_DAYS") {
            match days.parse::<i64>() {
                Ok(days) => self.billing.due_soon_days = days,
                Err(_) => warn!(value = %days, "Ignoring invalid NUBRAS_DUE_SOON_DAYS"),
            }
        }

        if let Some(currency) = lookup("NUBRAS_CURRENCY") {
            self.business.currency = currency;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ae", "alnubras", "backoffice")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The parsed API base URL; only http and https are accepted.
    pub fn api_url(&self) -> ClientResult<Url> {
        let url = Url::parse(&self.api.base_url)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }
        if url.host_str().is_none() {
            return Err(ClientError::InvalidUrl(format!(
                "API URL has no host: {}",
                self.api.base_url
            )));
        }

        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.billing.tax_rate_bps)
    }

    /// Clamped to `0..=MAX_DUE_SOON_DAYS`, so an unvalidated value cannot panic.
    pub fn due_soon_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.billing.due_soon_days.clamp(0, MAX_DUE_SOON_DAYS))
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            auto_print: self.billing.auto_print,
        }
    }
}
