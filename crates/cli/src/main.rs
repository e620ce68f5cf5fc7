//! SudoStake agent CLI — the main entry point.
//!
//! Commands:
//! - `chat`   — Local tool console against the configured network
//! - `doctor` — Diagnose configuration and session health

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "sudostake-agent",
    about = "SudoStake NEAR agent — vault operations from chat",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a config file (defaults to built-in testnet settings)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run tools locally against the configured network
    Chat {
        /// Dispatch a single `tool_name {json args}` line instead of
        /// entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Diagnose configuration and session health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { message } => commands::chat::run(cli.config.as_deref(), message).await?,
        Commands::Doctor => commands::doctor::run(cli.config.as_deref()).await?,
    }

    Ok(())
}
