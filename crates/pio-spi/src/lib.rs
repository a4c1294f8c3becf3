//! # pio-spi
//!
//! Plugin contract between a personium host and its credential-exchange
//! grant handlers.
//!
//! ## Design
//!
//! The host expects a capability set, expressed as traits:
//! - [`AuthPlugin`] - Category, grant type, account type, and the
//!   authentication decision
//! - [`AuthPluginFactory`] - Constructor the host discovers and calls once
//! - [`PluginRegistry`] - Routes token requests to plugins by grant type
//!
//! Authentication yields a three-way outcome: an [`AuthenticatedIdentity`],
//! [`AuthOutcome::Rejected`] for well-formed but wrong credentials, or an
//! [`AuthPluginError`] carrying an HTTP status hint.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod plugin;
pub mod registry;

pub use error::{AuthPluginError, AuthPluginResult, ErrorResponse, SpiError};
pub use plugin::{
    form_body, AuthOutcome, AuthPlugin, AuthPluginFactory, AuthenticatedIdentity, FactoryConfig,
    FormBody, GrantDescriptor, PluginMetadata, PLUGIN_CATEGORY_AUTH, RESOURCE_DIR_SETTING,
};
pub use registry::PluginRegistry;
