//! sysdash CLI
//!
//! A command-line tool for querying the local dashboard server: fetch a
//! metrics snapshot, control a process by pid, and check server health.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// CLI for the sysdash local system dashboard
#[derive(Parser)]
#[command(name = "sysdash")]
#[command(author, version, about = "CLI for the sysdash local system dashboard", long_about = None)]
pub struct Cli {
    /// Dashboard server URL (can also be set via SYSDASH_API_URL env var)
    #[arg(long, env = "SYSDASH_API_URL", default_value = "http://127.0.0.1:5000")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and display a metrics snapshot (blocks while the server samples)
    Metrics,

    /// Suspend (pause) a process
    Suspend {
        /// Target process id
        pid: u32,
    },

    /// Resume a suspended process
    Resume {
        /// Target process id
        pid: u32,
    },

    /// Ask a process to terminate
    Terminate {
        /// Target process id
        pid: u32,
    },

    /// Show server component health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = client::ApiClient::new(&cli.api_url)?;

    match cli.command {
        Commands::Metrics => commands::metrics::show_metrics(&client, cli.format).await?,
        Commands::Suspend { pid } => commands::process::run_action(&client, "suspend", pid).await?,
        Commands::Resume { pid } => commands::process::run_action(&client, "resume", pid).await?,
        Commands::Terminate { pid } => {
            commands::process::run_action(&client, "terminate", pid).await?
        }
        Commands::Health => commands::process::show_health(&client, cli.format).await?,
    }

    Ok(())
}
