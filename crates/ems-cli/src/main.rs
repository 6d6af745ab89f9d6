//! # ems
//!
//! Command-line entry point for the employee management simulator.

#![forbid(unsafe_code)]
#![deny(warnings)]

use clap::Parser;
use ems_cli::{
    cli::{Cli, Command},
    commands::{run_auth, run_config, run_employee, run_simulate, CommandContext},
    config::CliConfig,
    output::error,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr; simulation output owns stdout
    let default_filter = if cli.verbose { "debug,sqlx=warn" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let mut config = match CliConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    let ctx = CommandContext::new(&cli, &config);

    // Execute command
    let result = match cli.command {
        Command::Simulate(cmd) => run_simulate(cmd, &ctx).await,
        Command::Employee(cmd) => run_employee(cmd, &ctx).await,
        Command::Auth(cmd) => run_auth(cmd, &ctx).await,
        Command::Config(cmd) => run_config(cmd, &mut config),
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
