//! circdesk CLI - Library circulation desk from the command line.

mod commands;
mod config;
mod interactive;
mod output;
mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::DeskConfig;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "circdesk")]
#[command(author, version, about = "Library circulation desk")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    format: output::OutputFormat,

    /// Config file (defaults to ./circdesk.yml when present)
    #[arg(long, short = 'c', global = true, env = "CIRCDESK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive desk session with a simulated clock
    Session,

    /// Replay a scripted scenario file
    Run {
        /// Scenario file (YAML)
        scenario: PathBuf,
    },

    /// Show loan periods, grace periods and fees
    Policy,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = DeskConfig::load(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Session => commands::session(&config, cli.format),
        Commands::Run { scenario } => commands::run(&config, &scenario, cli.format),
        Commands::Policy => {
            commands::policy(cli.format);
            Ok(())
        }
    }
}
