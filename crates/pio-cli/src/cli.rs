//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Drives personium auth plugins with form-encoded token requests.
#[derive(Debug, Parser)]
#[command(name = "pio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (TOML).
    #[arg(short, long, env = "PIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory with replacement message resources (overrides config).
    #[arg(long)]
    pub resource_dir: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset (overrides config).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Authenticate a token request body.
    ///
    /// Exits with 0 when authenticated, 1 when rejected, 2 on an invalid
    /// request.
    Authenticate {
        /// Form-encoded body, e.g.
        /// `grant_type=urn:x-personium:auth:sample&sample_account=sample&sample_password=personium`.
        body: String,
    },

    /// List registered plugins.
    Describe,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_authenticate_command() {
        let cli = Cli::try_parse_from([
            "pio",
            "--output",
            "json",
            "--resource-dir",
            "/tmp/messages",
            "authenticate",
            "grant_type=x",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.resource_dir, Some(PathBuf::from("/tmp/messages")));
        assert!(matches!(cli.command, Command::Authenticate { ref body } if body == "grant_type=x"));
    }

    #[test]
    fn output_defaults_to_text() {
        let cli = Cli::try_parse_from(["pio", "describe"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(matches!(cli.command, Command::Describe));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
