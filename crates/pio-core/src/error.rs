//! Error handling for personium auth plugins.
//!
//! Construction-time failures live here. Per-request failures belong to the
//! plugin contract (`pio-spi`) so the host can map them to HTTP responses.

use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type alias using the core error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for plugin construction.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The message catalog could not be loaded or lacks required keys.
    ///
    /// Fatal at construction: a plugin that fails with this error must not
    /// be registered.
    #[error("failed to load message resource: {0}")]
    ResourceLoad(#[from] CatalogError),
}

impl Error {
    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::ResourceLoad(_))
    }
}
