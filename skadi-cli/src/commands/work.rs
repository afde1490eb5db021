//! Work command handler
//!
//! Runs the agent as a worker until Ctrl-C, or until the server rejects the
//! token or sends a job this agent cannot decode.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use skadi_worker::{CancellationToken, Worker, WorkerConfig};
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::shell::ShellHandler;

/// Worker options
#[derive(Args)]
pub struct WorkArgs {
    /// Seconds between polls [default: $SKADI_POLL_INTERVAL, or 60]
    #[arg(long)]
    interval: Option<u64>,

    /// Shell used to run job messages
    #[arg(long, default_value = "sh")]
    shell: String,
}

/// Run the worker loop
pub async fn handle_work_command(args: WorkArgs, config: &Config) -> Result<()> {
    let mut worker_config = WorkerConfig::from_env().with_request_timeout(config.timeout);
    if let Some(secs) = args.interval {
        worker_config = worker_config.with_poll_interval(Duration::from_secs(secs));
    }
    let mut worker = Worker::connect(&config.server, &config.token, worker_config)
        .context("Failed to create worker")?;
    let handler = ShellHandler::new(args.shell);

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested, finishing the current tick");
                shutdown.cancel();
            }
        });
    }

    println!(
        "{} Worker started (polling {} every {}s)",
        "▸".cyan(),
        config.server.bold(),
        worker.config().poll_interval().as_secs()
    );

    worker
        .run(&handler, shutdown)
        .await
        .context("Worker stopped")?;

    println!("{} Worker stopped", "✓".green());
    Ok(())
}
