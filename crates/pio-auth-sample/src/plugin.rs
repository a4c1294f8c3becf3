//! Sample grant handler and its factory.

use std::path::Path;
use std::sync::Arc;

use pio_core::MessageCatalog;
use pio_spi::{
    AuthOutcome, AuthPlugin, AuthPluginError, AuthPluginFactory, AuthPluginResult,
    AuthenticatedIdentity, FactoryConfig, FormBody, PluginMetadata, SpiError,
    RESOURCE_DIR_SETTING,
};

use crate::validator::{get_single_value, ValidationError, BODY_PARAM};
use crate::{
    ACCOUNT_TYPE, ERROR_REQUIRED_PARAM_MISSING, GRANT_TYPE, KEY_ACCOUNT, KEY_PASSWORD,
    MESSAGE_RESOURCE,
};

/// The only password the sample accepts.
const ACCEPTED_PASSWORD: &str = "personium";

/// Message keys the plugin formats at request time.
const REQUIRED_MESSAGE_KEYS: &[&str] = &[ERROR_REQUIRED_PARAM_MISSING];

/// Message resource compiled into the plugin.
const BUNDLED_MESSAGES: &str = include_str!("../resources/plugin-error-messages.properties");

/// Sample auth plugin.
///
/// - `sample_password` is `personium`: authenticated as `sample_account`
/// - any other `sample_password`: rejected
/// - `sample_account` or `sample_password` missing or empty: invalid request
#[derive(Debug, Clone)]
pub struct SampleAuthPlugin {
    messages: MessageCatalog,
}

impl SampleAuthPlugin {
    /// Creates the plugin with the bundled message resource.
    ///
    /// ## Errors
    ///
    /// Returns [`pio_core::Error::ResourceLoad`] if the bundled resource is
    /// malformed or lacks a required key.
    pub fn new() -> pio_core::Result<Self> {
        Self::with_catalog(MessageCatalog::parse(MESSAGE_RESOURCE, BUNDLED_MESSAGES)?)
    }

    /// Creates the plugin with `plugin-error-messages.properties` from `dir`.
    ///
    /// ## Errors
    ///
    /// Returns [`pio_core::Error::ResourceLoad`] if the file cannot be read,
    /// is malformed, or lacks a required key.
    pub fn from_resource_dir(dir: impl AsRef<Path>) -> pio_core::Result<Self> {
        Self::with_catalog(MessageCatalog::load(dir.as_ref().join(MESSAGE_RESOURCE))?)
    }

    /// Creates the plugin with an already loaded catalog.
    ///
    /// ## Errors
    ///
    /// Returns [`pio_core::Error::ResourceLoad`] if the catalog lacks a
    /// required key.
    pub fn with_catalog(messages: MessageCatalog) -> pio_core::Result<Self> {
        messages.require(REQUIRED_MESSAGE_KEYS)?;
        Ok(Self { messages })
    }

    /// Returns the plugin's message catalog.
    #[must_use]
    pub const fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    fn invalid_request(&self, err: &ValidationError) -> AuthPluginError {
        match self.messages.format(err.message_key(), &[&err.param()]) {
            Ok(message) => AuthPluginError::invalid_request(message),
            Err(format_err) => {
                tracing::error!(error = %format_err, "failed to format error message");
                AuthPluginError::Internal(format_err.to_string())
            }
        }
    }

    fn single_value<'a>(&self, body: &'a FormBody, key: &str) -> AuthPluginResult<&'a str> {
        get_single_value(body, key).map_err(|err| self.invalid_request(&err))
    }
}

impl AuthPlugin for SampleAuthPlugin {
    fn grant_type(&self) -> &str {
        GRANT_TYPE
    }

    fn account_type(&self) -> &str {
        ACCOUNT_TYPE
    }

    fn authenticate(&self, body: &FormBody) -> AuthPluginResult<AuthOutcome> {
        if body.is_empty() {
            return Err(self.invalid_request(&ValidationError::missing(BODY_PARAM)));
        }

        let account = self.single_value(body, KEY_ACCOUNT)?;
        let password = self.single_value(body, KEY_PASSWORD)?;

        if password != ACCEPTED_PASSWORD {
            tracing::debug!(grant_type = GRANT_TYPE, "sample credentials rejected");
            return Ok(AuthOutcome::Rejected);
        }

        tracing::debug!(grant_type = GRANT_TYPE, account, "sample credentials accepted");
        Ok(AuthOutcome::Authenticated(AuthenticatedIdentity::new(
            account,
            ACCOUNT_TYPE,
        )))
    }
}

/// Factory the host calls to create [`SampleAuthPlugin`].
///
/// Honors the `resource_dir` setting to load messages from disk instead of
/// the bundled resource.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleAuthPluginFactory;

impl AuthPluginFactory for SampleAuthPluginFactory {
    fn id(&self) -> &'static str {
        "auth-sample"
    }

    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            id: "auth-sample",
            name: "Sample auth plugin",
            description: "Accepts any account whose password is \"personium\"",
        }
    }

    fn create(&self, config: &dyn FactoryConfig) -> Result<Arc<dyn AuthPlugin>, SpiError> {
        let plugin = match config.get(RESOURCE_DIR_SETTING) {
            Some(dir) => SampleAuthPlugin::from_resource_dir(dir)?,
            None => SampleAuthPlugin::new()?,
        };
        Ok(Arc::new(plugin))
    }
}
