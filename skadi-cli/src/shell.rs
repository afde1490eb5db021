//! Shell job handler
//!
//! Runs each job message as `<shell> -c <message>`. Exit status 0 reports
//! the trimmed stdout; anything else fails the job with stderr, or with the
//! exit status when stderr is empty. Reported text is capped at
//! [`MAX_RESULT_BYTES`].

use async_trait::async_trait;
use skadi_worker::{Handler, HandlerError};
use tokio::process::Command;
use tracing::{debug, info};

/// Largest result sent back to the server
pub const MAX_RESULT_BYTES: usize = 64 * 1024;

/// Executes job messages with a shell
#[derive(Debug, Clone)]
pub struct ShellHandler {
    shell: String,
}

impl ShellHandler {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

#[async_trait]
impl Handler for ShellHandler {
    async fn handle(&self, job_id: &str, message: &str) -> Result<String, HandlerError> {
        info!("Job {}: {} -c {:?}", job_id, self.shell, message);

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(message)
            .kill_on_drop(true)
            .output()
            .await?;

        debug!("Job {} exited with {}", job_id, output.status);

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Ok(truncate(stdout.trim_end()));
        }

        let stderr = truncate(String::from_utf8_lossy(&output.stderr).trim());
        if stderr.is_empty() {
            Err(format!("command failed: {}", output.status).into())
        } else {
            Err(stderr.into())
        }
    }
}

/// Cuts `text` to at most `MAX_RESULT_BYTES`, keeping whole characters
fn truncate(text: &str) -> String {
    if text.len() <= MAX_RESULT_BYTES {
        return text.to_string();
    }
    let mut end = MAX_RESULT_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
