//! PairBot CLI — the main entry point.
//!
//! Commands:
//! - `run`      — Group a channel once and open the conversations
//! - `preview`  — Group a list of members locally and print the result
//! - `daemon`   — Run configured routines on their cron schedules
//! - `onboard`  — Write a starter config
//! - `doctor`   — Diagnose configuration

use clap::{Parser, Subcommand};
use pairbot_core::GroupMode;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "pairbot",
    about = "PairBot — randomized coffee-chat pairs and groups for Slack channels",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.pairbot/config.toml)
    #[arg(short, long, global = true, env = "PAIRBOT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Group a channel's members and start one conversation per group
    Run {
        /// `pairing` (pairs, trailing singleton merged) or `group`
        #[arg(short, long, default_value = "pairing")]
        mode: GroupMode,

        /// Channel to group (defaults to the mode's configured channel)
        #[arg(long)]
        channel: Option<String>,

        /// Log the groups instead of messaging anyone
        #[arg(long)]
        dry_run: bool,
    },

    /// Form groups from the given member ids without contacting Slack
    Preview {
        #[arg(short, long, default_value = "pairing")]
        mode: GroupMode,

        /// Member ids, e.g. U1234 U2345 U3456
        #[arg(required = true)]
        members: Vec<String>,
    },

    /// Run configured routines on their schedules
    Daemon,

    /// Write the default config file
    Onboard,

    /// Diagnose configuration
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

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run {
            mode,
            channel,
            dry_run,
        } => commands::run::run(config_path, mode, channel, dry_run).await?,
        Commands::Preview { mode, members } => commands::preview::run(config_path, mode, members).await?,
        Commands::Daemon => commands::daemon::run(config_path).await?,
        Commands::Onboard => commands::onboard::run(config_path).await?,
        Commands::Doctor => commands::doctor::run(config_path).await?,
    }

    Ok(())
}
