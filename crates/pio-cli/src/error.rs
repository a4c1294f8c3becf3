//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Plugin construction or configuration error.
    #[error(transparent)]
    Core(#[from] pio_core::Error),

    /// Plugin registration error.
    #[error("plugin registration failed: {0}")]
    Registry(#[from] pio_spi::SpiError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
