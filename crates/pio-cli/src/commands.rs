//! Command implementations.

use pio_auth_sample::{SampleAuthPluginFactory, GRANT_TYPE};
use pio_core::Config;
use pio_spi::{
    form_body, AuthOutcome, AuthPluginError, AuthenticatedIdentity, ErrorResponse, FormBody,
    GrantDescriptor, PluginRegistry,
};
use serde::Serialize;

use crate::CliResult;

/// Form parameter naming the grant type.
pub const GRANT_TYPE_PARAM: &str = "grant_type";

/// Outcome of a token request as the host would report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TokenOutcome {
    /// The plugin authenticated an account.
    Authenticated {
        /// Authenticated identity.
        identity: AuthenticatedIdentity,
    },
    /// The plugin rejected the credentials.
    Rejected,
    /// The request was not acceptable.
    Error {
        /// HTTP status hint.
        status: u16,
        /// OAuth error body.
        #[serde(flatten)]
        response: ErrorResponse,
    },
}

impl TokenOutcome {
    /// Returns the process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Authenticated { .. } => 0,
            Self::Rejected => 1,
            Self::Error { .. } => 2,
        }
    }

    fn request_error(error: &str, description: impl Into<String>) -> Self {
        Self::Error {
            status: 400,
            response: ErrorResponse {
                error: error.to_string(),
                error_description: Some(description.into()),
            },
        }
    }
}

impl From<AuthOutcome> for TokenOutcome {
    fn from(outcome: AuthOutcome) -> Self {
        match outcome {
            AuthOutcome::Authenticated(identity) => Self::Authenticated { identity },
            AuthOutcome::Rejected => Self::Rejected,
        }
    }
}

impl From<AuthPluginError> for TokenOutcome {
    fn from(err: AuthPluginError) -> Self {
        Self::Error {
            status: err.status_code(),
            response: err.to_error_response(),
        }
    }
}

/// Creates a registry holding every plugin shipped with the harness.
///
/// ## Errors
///
/// Returns an error if a plugin fails to initialize or a shipped grant type
/// ends up unregistered.
pub fn build_registry(config: &Config) -> CliResult<PluginRegistry> {
    let registry = PluginRegistry::new();
    registry.register_factory(&SampleAuthPluginFactory, config)?;
    registry.validate_required(&[GRANT_TYPE])?;
    Ok(registry)
}

/// Decodes an `application/x-www-form-urlencoded` body.
#[must_use]
pub fn decode_body(raw: &str) -> FormBody {
    form_body(url::form_urlencoded::parse(raw.trim().as_bytes()).into_owned())
}

/// Routes a form-encoded token request to its plugin.
#[must_use]
pub fn handle_token_request(registry: &PluginRegistry, raw_body: &str) -> TokenOutcome {
    let body = decode_body(raw_body);

    let Some(grant_type) = body
        .get(GRANT_TYPE_PARAM)
        .and_then(|values| values.first())
        .filter(|value| !value.is_empty())
    else {
        return TokenOutcome::request_error("invalid_request", "grant_type is required");
    };

    let Some(plugin) = registry.get(grant_type) else {
        tracing::debug!(grant_type = %grant_type, "no plugin for grant type");
        return TokenOutcome::request_error(
            "unsupported_grant_type",
            format!("grant type '{grant_type}' is not supported"),
        );
    };

    match plugin.authenticate(&body) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            tracing::debug!(grant_type = %grant_type, error = %err, "token request refused");
            err.into()
        }
    }
}

/// Lists descriptors of all registered plugins, sorted by grant type.
#[must_use]
pub fn describe(registry: &PluginRegistry) -> Vec<GrantDescriptor> {
    registry
        .grant_types()
        .iter()
        .filter_map(|grant_type| registry.get(grant_type))
        .map(|plugin| plugin.descriptor())
        .collect()
}
