//! # pio-cli
//!
//! Command-line harness for personium auth plugins.
//!
//! The `pio` binary plays the host's part of the token endpoint: it decodes
//! an `application/x-www-form-urlencoded` body, routes it to the plugin
//! registered for its `grant_type`, and prints the outcome.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, CliResult};
