//! Plugin traits and the values exchanged with the host.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AuthPluginResult, SpiError};

/// Plugin category reported by authentication plugins.
pub const PLUGIN_CATEGORY_AUTH: &str = "auth";

/// Factory setting naming a directory of replacement message resources.
pub const RESOURCE_DIR_SETTING: &str = "resource_dir";

/// Decoded `application/x-www-form-urlencoded` body.
///
/// Each parameter keeps every submitted value in order. Plugins only look at
/// the first one.
pub type FormBody = HashMap<String, Vec<String>>;

/// Builds a [`FormBody`] from decoded name/value pairs, preserving the order
/// of repeated names.
pub fn form_body<I, K, V>(pairs: I) -> FormBody
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut body = FormBody::new();
    for (name, value) in pairs {
        body.entry(name.into()).or_default().push(value.into());
    }
    body
}

/// Identity established by a successful authentication.
///
/// The host uses it to look up the account and mint a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedIdentity {
    /// Account name as supplied by the client.
    pub account_name: String,
    /// Account type tag of the authenticating plugin.
    pub account_type: String,
}

impl AuthenticatedIdentity {
    /// Creates an identity.
    #[must_use]
    pub fn new(account_name: impl Into<String>, account_type: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            account_type: account_type.into(),
        }
    }
}

/// Result of a well-formed authentication request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials accepted.
    Authenticated(AuthenticatedIdentity),
    /// Credentials rejected. Says nothing about which credential was wrong.
    Rejected,
}

impl AuthOutcome {
    /// Checks if this is an authenticated outcome.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the identity, if authenticated.
    #[must_use]
    pub const fn identity(&self) -> Option<&AuthenticatedIdentity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Rejected => None,
        }
    }

    /// Converts into the identity, if authenticated.
    #[must_use]
    pub fn into_identity(self) -> Option<AuthenticatedIdentity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Rejected => None,
        }
    }
}

/// The constants that identify a plugin to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantDescriptor {
    /// Plugin category.
    pub category: String,
    /// Grant type URN routed to the plugin.
    pub grant_type: String,
    /// Account type the plugin authenticates.
    pub account_type: String,
}

/// Credential-exchange grant handler.
///
/// A single instance serves every request, possibly from many threads at
/// once, so implementations hold no mutable state.
pub trait AuthPlugin: Send + Sync + Debug {
    /// Returns the plugin category.
    fn category(&self) -> &str {
        PLUGIN_CATEGORY_AUTH
    }

    /// Returns the grant type URN this plugin handles.
    ///
    /// Matches the `grant_type` parameter sent to the token endpoint.
    fn grant_type(&self) -> &str;

    /// Returns the account type this plugin authenticates.
    ///
    /// Accounts created with this type are routed to the plugin.
    fn account_type(&self) -> &str;

    /// Decides whether the request body authenticates an account.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthPluginError::InvalidRequest`](crate::AuthPluginError::InvalidRequest)
    /// when the body lacks a required parameter.
    fn authenticate(&self, body: &FormBody) -> AuthPluginResult<AuthOutcome>;

    /// Returns the plugin's descriptor.
    fn descriptor(&self) -> GrantDescriptor {
        GrantDescriptor {
            category: self.category().to_string(),
            grant_type: self.grant_type().to_string(),
            account_type: self.account_type().to_string(),
        }
    }
}

/// Metadata about a plugin factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMetadata {
    /// Unique identifier for this factory.
    pub id: &'static str,

    /// Human-readable name.
    pub name: &'static str,

    /// Description of what the plugin does.
    pub description: &'static str,
}

/// Constructor the host discovers to create a plugin.
///
/// `create` is called once at startup. A failure means the plugin is not
/// registered.
pub trait AuthPluginFactory: Send + Sync + Debug {
    /// Returns the unique identifier for this factory.
    fn id(&self) -> &'static str;

    /// Returns metadata about the plugin.
    fn metadata(&self) -> PluginMetadata;

    /// Creates the plugin.
    ///
    /// ## Errors
    ///
    /// Returns an error if the plugin cannot be initialized.
    fn create(&self, config: &dyn FactoryConfig) -> Result<Arc<dyn AuthPlugin>, SpiError>;
}

/// Configuration interface for factory initialization.
pub trait FactoryConfig: Send + Sync {
    /// Gets a string configuration value.
    fn get(&self, key: &str) -> Option<&str>;
}

impl FactoryConfig for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl FactoryConfig for pio_core::Config {
    fn get(&self, key: &str) -> Option<&str> {
        match key {
            RESOURCE_DIR_SETTING => self.catalog.resource_dir.as_deref()?.to_str(),
            _ => None,
        }
    }
}
