//! Plugin error types.
//!
//! Per-request failures are surfaced to the host with an HTTP status hint and
//! an OAuth-style error code so the token endpoint can answer without knowing
//! the plugin's internals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned from [`AuthPlugin::authenticate`](crate::AuthPlugin::authenticate).
///
/// Wrong credentials are not an error; see [`AuthOutcome::Rejected`](crate::AuthOutcome::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthPluginError {
    /// A required parameter (or the whole body) is missing or empty.
    ///
    /// The message is already localized.
    #[error("{message}")]
    InvalidRequest {
        /// Localized, user-facing message.
        message: String,
    },

    /// Unexpected plugin failure, such as a malformed message template.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthPluginError {
    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Returns the OAuth 2.0 error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Internal(_) => "server_error",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. } => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Creates an error response for the host's token endpoint.
    ///
    /// Internal details are not exposed in the description.
    #[must_use]
    pub fn to_error_response(&self) -> ErrorResponse {
        let description = match self {
            Self::InvalidRequest { message } => message.clone(),
            Self::Internal(_) => "internal error".to_string(),
        };
        ErrorResponse {
            error: self.error_code().to_string(),
            error_description: Some(description),
        }
    }
}

/// OAuth 2.0 error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub error: String,

    /// Human-readable error description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

/// Result type for plugin operations.
pub type AuthPluginResult<T> = Result<T, AuthPluginError>;

/// Errors from plugin construction and registration.
#[derive(Debug, Error)]
pub enum SpiError {
    /// No plugin handles the grant type.
    #[error("no plugin registered for grant type: {0}")]
    PluginNotFound(String),

    /// A plugin for the grant type is already registered.
    #[error("grant type already registered: {0}")]
    DuplicateGrantType(String),

    /// Plugin initialization failed.
    #[error("plugin initialization failed: {0}")]
    InitializationFailed(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<pio_core::Error> for SpiError {
    fn from(err: pio_core::Error) -> Self {
        match err {
            pio_core::Error::Config(message) => Self::Configuration(message),
            other => Self::InitializationFailed(other.to_string()),
        }
    }
}
