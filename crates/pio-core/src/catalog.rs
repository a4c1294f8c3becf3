//! Localized message catalog.
//!
//! A catalog maps dotted message keys (`error.required.param.missing`) to
//! templates with positional placeholders. It is loaded once when a plugin is
//! constructed and is read-only afterwards, so a single instance can be shared
//! by every request thread without synchronization.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::message_format::{format_message, TemplateError};
use crate::properties;

/// Errors raised while loading or using a message catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The resource could not be opened or read.
    #[error("cannot read message resource '{resource}': {source}")]
    Io {
        /// Name or path of the resource.
        resource: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The resource is not valid properties text.
    #[error("malformed message resource at line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// A key the plugin depends on is absent.
    #[error("message resource is missing required key '{0}'")]
    MissingKey(String),

    /// A template could not be formatted.
    #[error("malformed template for message '{key}': {source}")]
    Template {
        /// Message key whose template is malformed.
        key: String,
        /// Formatting failure.
        #[source]
        source: TemplateError,
    },
}

/// Immutable mapping from message key to template.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    resource: String,
    entries: HashMap<String, String>,
}

impl MessageCatalog {
    /// Loads a catalog from a properties file on disk.
    ///
    /// The file handle is dropped before this returns, on success or failure.
    ///
    /// ## Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be opened or read and
    /// [`CatalogError::Parse`] if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let resource = path.display().to_string();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            resource: resource.clone(),
            source,
        })?;
        Self::from_reader(resource, BufReader::new(file))
    }

    /// Reads a catalog from any byte source. The text must be UTF-8.
    ///
    /// ## Errors
    ///
    /// Returns [`CatalogError::Io`] on read failure or invalid UTF-8 and
    /// [`CatalogError::Parse`] if the text is malformed.
    pub fn from_reader<R: Read>(resource: impl Into<String>, mut reader: R) -> Result<Self, CatalogError> {
        let resource = resource.into();
        let mut text = String::new();
        if let Err(source) = reader.read_to_string(&mut text) {
            return Err(CatalogError::Io { resource, source });
        }
        Self::parse(resource, &text)
    }

    /// Parses a catalog from properties text.
    ///
    /// ## Errors
    ///
    /// Returns [`CatalogError::Parse`] if the text is malformed.
    pub fn parse(resource: impl Into<String>, text: &str) -> Result<Self, CatalogError> {
        let resource = resource.into();
        let entries = properties::parse(text)?;
        tracing::debug!(resource = %resource, entries = entries.len(), "message catalog loaded");
        Ok(Self { resource, entries })
    }

    /// Checks that every key in `keys` is present.
    ///
    /// ## Errors
    ///
    /// Returns [`CatalogError::MissingKey`] naming the first absent key.
    pub fn require(&self, keys: &[&str]) -> Result<(), CatalogError> {
        match keys.iter().find(|key| !self.contains(key)) {
            Some(key) => Err(CatalogError::MissingKey((*key).to_string())),
            None => Ok(()),
        }
    }

    /// Returns the name of the resource this catalog was loaded from.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the raw template for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns whether `key` has a template.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the catalog holds no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Formats the message for `key` with positional `args`.
    ///
    /// With no arguments the template is returned verbatim. An unknown key
    /// yields the key itself.
    ///
    /// ## Errors
    ///
    /// Returns [`CatalogError::Template`] if the template is malformed.
    pub fn format(&self, key: &str, args: &[&dyn fmt::Display]) -> Result<String, CatalogError> {
        let Some(template) = self.get(key) else {
            tracing::warn!(key, resource = %self.resource, "message key not found, using key as message");
            return Ok(key.to_string());
        };

        if args.is_empty() {
            return Ok(template.to_string());
        }

        format_message(template, args).map_err(|source| CatalogError::Template {
            key: key.to_string(),
            source,
        })
    }
}
