use crate::utils::errors::{CertStoreError, Result};
use std::future::Future;
use tokio::process::Command;

/// Executes a full command line and hands back everything it printed.
pub trait CommandRunner: Send + Sync {
    /// Run `command_line` through the host shell and return its output as
    /// text. The exit status is not part of the contract.
    ///
    /// [`ShellRunner`] captures the two streams separately and returns all of
    /// stdout followed by all of stderr; lines are not interleaved in the
    /// order the tool wrote them.
    fn run(&self, command_line: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Runs command lines through `cmd /C` on Windows and `sh -c` elsewhere
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }

    #[cfg(windows)]
    fn shell_command(command_line: &str) -> Command {
        let mut cmd = Command::new("cmd");
        // cmd.exe does its own parsing, so the line must reach it unquoted
        cmd.arg("/C").raw_arg(command_line);
        cmd
    }

    #[cfg(not(windows))]
    fn shell_command(command_line: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);
        cmd
    }
}

impl CommandRunner for ShellRunner {
    async fn run(&self, command_line: &str) -> Result<String> {
        tracing::debug!("Executing: {command_line}");

        let output = Self::shell_command(command_line)
            .output()
            .await
            .map_err(|e| {
                CertStoreError::Command(format!("Failed to execute '{command_line}': {e}"))
            })?;

        if output.status.success() {
            tracing::trace!("Command exited successfully");
        } else {
            tracing::debug!("Command exited with {}", output.status);
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(combined)
    }
}
