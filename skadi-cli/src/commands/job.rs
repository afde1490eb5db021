//! Job command handlers
//!
//! Hands jobs to other agents and schedules delayed jobs for this one.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use std::time::Duration;

use crate::config::Config;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Add a job to another agent, written as `<AgentName> <Job>`
    Add {
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },
    /// Add a delayed job to this agent
    Delay {
        /// Job message
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,

        /// Delay in seconds
        #[arg(long)]
        after: u64,

        /// Do not notify anyone when the job status changes
        #[arg(long, conflicts_with = "callback")]
        silent: bool,

        /// URL the server calls when the job status changes
        #[arg(long)]
        callback: Option<String>,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        JobCommands::Add { content } => {
            let content = content.join(" ");
            client
                .add_job_to_other(&content)
                .await
                .context("Failed to add job")?;
            println!("{} Job added: {}", "✓".green(), content.bold());
        }
        JobCommands::Delay {
            message,
            after,
            silent,
            callback,
        } => {
            let message = message.join(" ");
            let after = Duration::from_secs(after);

            let added = match (silent, callback) {
                (true, _) => client.add_delayed_job_silent(&message, after).await,
                (false, Some(url)) => {
                    client
                        .add_delayed_job_with_callback(&message, after, url)
                        .await
                }
                (false, None) => client.add_delayed_job(&message, after).await,
            };
            added.context("Failed to add delayed job")?;

            println!(
                "{} Delayed job added: {} (in {}s)",
                "✓".green(),
                message.bold(),
                after.as_secs().to_string().dimmed()
            );
        }
    }

    Ok(())
}
