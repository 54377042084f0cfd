//! Fairval CLI - command-line option valuation.
//!
//! # Commands
//!
//! - `fairval price` - value an option from explicit market parameters
//! - `fairval quote` - resolve a contract against the bundled demo
//!   snapshot, value it, and print a recommendation
//!
//! The engine itself performs no I/O; this binary is the service layer
//! that feeds it and formats what comes back.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;

pub use error::{CliError, Result};

use commands::{price::PriceArgs, quote::QuoteArgs};

/// Fairval option pricing CLI.
#[derive(Parser)]
#[command(name = "fairval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value an option from explicit market parameters
    Price(PriceArgs),

    /// Resolve a contract against the demo snapshot and recommend
    Quote(QuoteArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Price(args) => commands::price::run(&args)?,
        Commands::Quote(args) => commands::quote::run(&args)?,
    }
    Ok(())
}
