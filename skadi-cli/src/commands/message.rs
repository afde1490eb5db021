//! Message command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use crate::config::Config;

/// Message subcommands
#[derive(Subcommand)]
pub enum MessageCommands {
    /// Send an info level message
    Info {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Send a warning level message
    Warning {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

/// Handle message commands
pub async fn handle_message_command(command: MessageCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        MessageCommands::Info { text } => {
            client
                .send_info(&text.join(" "))
                .await
                .context("Failed to send info message")?;
            println!("{} Info message sent", "✓".green());
        }
        MessageCommands::Warning { text } => {
            client
                .send_warning(&text.join(" "))
                .await
                .context("Failed to send warning message")?;
            println!("{} Warning message sent", "✓".yellow());
        }
    }

    Ok(())
}
