//! # Client Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     HTTP status         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  Unauthorized (401)     │ │
//! │  │  InvalidUrl     │  │  (reqwest)      │  │  Forbidden    (403)     │ │
//! │  │  ConfigLoad/Save│  │                 │  │  NotFound     (404)     │ │
//! │  └─────────────────┘  └─────────────────┘  │  Validation   (400/422) │ │
//! │                                            │  Server       (other)   │ │
//! │  ┌─────────────────┐  ┌─────────────────┐  └─────────────────────────┘ │
//! │  │  Business rule  │  │    Response     │                              │
//! │  │  Core (guards)  │  │ InvalidResponse │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures are never retried. Whatever the category, the operator sees
//! [`ClientError::user_message`].

use nubras_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Message shown when the server gave no usable one.
pub const GENERIC_FAILURE: &str = "Request failed. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport
    // =========================================================================
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // =========================================================================
    // HTTP status classes (message is the server's, when it sent one)
    // =========================================================================
    #[error("Authentication required: {}", .0.as_deref().unwrap_or("please log in"))]
    Unauthorized(Option<String>),

    #[error("Permission denied: {}", .0.as_deref().unwrap_or("not allowed"))]
    Forbidden(Option<String>),

    #[error("Not found: {}", .0.as_deref().unwrap_or("resource does not exist"))]
    NotFound(Option<String>),

    #[error("Validation error: {}", .0.as_deref().unwrap_or("request rejected"))]
    Validation(Option<String>),

    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("request failed"))]
    Server { status: u16, message: Option<String> },

    // =========================================================================
    // Response body
    // =========================================================================
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // =========================================================================
    // Business rules checked before sending
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl ClientError {
    /// Text for the operator: the server's own message when it sent one,
    /// otherwise a generic failure line.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unauthorized(m)
            | ClientError::Forbidden(m)
            | ClientError::NotFound(m)
            | ClientError::Validation(m)
            | ClientError::Server { message: m, .. } => {
                m.clone().unwrap_or_else(|| GENERIC_FAILURE.to_string())
            }
            ClientError::Http(_) | ClientError::InvalidResponse(_) => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a failed request, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}
