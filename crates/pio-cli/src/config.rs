//! Configuration loading for the harness.
//!
//! Precedence, lowest first: defaults, the TOML file, `PIO_*` environment
//! variables, command-line flags.

use std::path::Path;

use pio_core::Config;

use crate::cli::Cli;
use crate::{CliError, CliResult};

/// Loads the effective configuration for `cli`.
///
/// ## Errors
///
/// Returns an error if the file cannot be read or parsed, or the result does
/// not validate.
pub fn load(cli: &Cli) -> CliResult<Config> {
    let mut config = match cli.config.as_deref() {
        Some(path) => {
            let mut config = read_file(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        }
        None => Config::from_env(),
    };

    if let Some(dir) = &cli.resource_dir {
        config.catalog.resource_dir = Some(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }

    config.validate()?;
    Ok(config)
}

/// Reads a TOML configuration file.
///
/// ## Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn read_file(path: &Path) -> CliResult<Config> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| CliError::Config(format!("failed to parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsString;
    use std::io::Write;

    #[test]
    fn reads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let config = read_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.catalog.resource_dir, None);
    }

    #[test]
    fn rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging\nlevel = ").unwrap();

        assert!(matches!(read_file(file.path()), Err(CliError::Config(_))));
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let cli = Cli::parse_from([
            OsString::from("pio"),
            "--config".into(),
            file.path().into(),
            "--resource-dir".into(),
            dir.path().into(),
            "--log-level".into(),
            "trace".into(),
            "describe".into(),
        ]);
        let config = load(&cli).unwrap();

        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.catalog.resource_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn missing_resource_dir_fails_validation() {
        let cli = Cli::parse_from(["pio", "--resource-dir", "/nonexistent/pio-resources", "describe"]);
        assert!(matches!(load(&cli), Err(CliError::Core(pio_core::Error::Config(_)))));
    }
}
