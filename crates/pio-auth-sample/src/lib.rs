//! # pio-auth-sample
//!
//! Sample auth plugin for the `urn:x-personium:auth:sample` grant type.
//!
//! The plugin accepts any `sample_account` whose `sample_password` is the
//! literal `personium`. It demonstrates the plugin contract and is not meant
//! to authenticate real users.
//!
//! ## Example
//!
//! ```
//! use pio_auth_sample::SampleAuthPlugin;
//! use pio_spi::{form_body, AuthPlugin};
//!
//! let plugin = SampleAuthPlugin::new()?;
//! let body = form_body([
//!     ("grant_type", "urn:x-personium:auth:sample"),
//!     ("sample_account", "sample"),
//!     ("sample_password", "personium"),
//! ]);
//!
//! let outcome = plugin.authenticate(&body)?;
//! assert_eq!(outcome.identity().map(|i| i.account_name.as_str()), Some("sample"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod plugin;
pub mod validator;

pub use plugin::{SampleAuthPlugin, SampleAuthPluginFactory};
pub use validator::{get_single_value, ValidationError};

/// Grant type handled by the plugin.
pub const GRANT_TYPE: &str = "urn:x-personium:auth:sample";

/// Account type authenticated by the plugin.
pub const ACCOUNT_TYPE: &str = "auth:sample";

/// Body parameter carrying the account name.
pub const KEY_ACCOUNT: &str = "sample_account";

/// Body parameter carrying the password.
pub const KEY_PASSWORD: &str = "sample_password";

/// Name of the message resource.
pub const MESSAGE_RESOURCE: &str = "plugin-error-messages.properties";

/// Message key: required parameter missing. Takes the parameter name.
pub const ERROR_REQUIRED_PARAM_MISSING: &str = "error.required.param.missing";
