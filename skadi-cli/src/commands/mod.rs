//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod message;
mod work;

pub use job::JobCommands;
pub use message::MessageCommands;
pub use work::WorkArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Send a message to the agent owner's IM channel
    Message {
        #[command(subcommand)]
        command: MessageCommands,
    },
    /// Enqueue jobs
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Run as a worker, executing each job message with a shell
    Work(WorkArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Message { command } => message::handle_message_command(command, config).await,
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Work(args) => work::handle_work_command(args, config).await,
    }
}
