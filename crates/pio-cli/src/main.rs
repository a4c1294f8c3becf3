//! # pio
//!
//! Runs form-encoded token requests through the registered auth plugins.

#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pio_cli::{
    cli::{Cli, Command},
    commands, config, output,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit code for configuration and initialization failures.
const EXIT_FAILURE: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let config = config::load(cli).context("failed to load configuration")?;
    init_tracing(&config.logging.level);

    let registry = commands::build_registry(&config).context("failed to initialize plugins")?;

    let (rendered, code) = match &cli.command {
        Command::Authenticate { body } => {
            let outcome = commands::handle_token_request(&registry, body);
            (output::render_outcome(&outcome, cli.output)?, outcome.exit_code())
        }
        Command::Describe => {
            let descriptors = commands::describe(&registry);
            (output::render_descriptors(&descriptors, cli.output)?, 0)
        }
    };

    println!("{rendered}");
    Ok(code)
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
