//! Skadi CLI
//!
//! Command-line interface for a skadi agent: push messages, enqueue jobs, or
//! run as a worker that executes job messages as shell commands.

mod commands;
mod config;
mod shell;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "skadi")]
#[command(about = "Skadi agent CLI", long_about = None)]
struct Cli {
    /// Skadi server URL
    #[arg(long, env = "SKADI_SERVER", default_value = "https://api.letserver.run")]
    server: String,

    /// Agent token
    #[arg(long, env = "SKADI_TOKEN", hide_env_values = true)]
    token: String,

    /// Timeout of each server call, in milliseconds
    #[arg(long, env = "SKADI_TIMEOUT_MS", default_value_t = 3000)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skadi=info,skadi_worker=info,skadi_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        server: cli.server,
        token: cli.token,
        timeout: Duration::from_millis(cli.timeout_ms),
    };

    handle_command(cli.command, &config).await
}
