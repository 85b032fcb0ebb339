use crate::domain::ports::{CommandRunner, CommandStatus};
use crate::utils::error::{Result, WorkspaceError};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Runs commands through the platform shell (`sh -c`, or `cmd /C` on Windows)
/// with stdio inherited from this process.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, directory: &Path) -> Result<CommandStatus> {
        let mut cmd = Self::shell_command(command);
        cmd.current_dir(directory);

        tracing::debug!("🐚 spawning shell in {}", directory.display());

        let status = cmd
            .status()
            .await
            .map_err(|e| WorkspaceError::SpawnError {
                directory: directory.display().to_string(),
                command: command.to_string(),
                source: e,
            })?;

        Ok(CommandStatus::from(status))
    }
}
