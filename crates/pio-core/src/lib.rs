//! # pio-core
//!
//! Core utilities, configuration, and error handling shared by personium
//! auth plugins.
//!
//! ## Contents
//!
//! - [`MessageCatalog`] - Localized message templates loaded from a
//!   properties resource
//! - [`Config`] - Plugin configuration with environment overrides
//! - [`Error`] - Error type for plugin construction

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod message_format;
pub mod properties;

pub use catalog::{CatalogError, MessageCatalog};
pub use config::Config;
pub use error::{Error, Result};
pub use message_format::TemplateError;
