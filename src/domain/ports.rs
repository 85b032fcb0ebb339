use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Exit status of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn from_code(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
        }
    }
}

impl From<std::process::ExitStatus> for CommandStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// 在指定目錄中透過 shell 執行指令，並等待其結束
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str, directory: &Path) -> Result<CommandStatus>;
}

/// Host operating system as reported by `std::env::consts::OS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    os: String,
}

impl HostPlatform {
    pub fn current() -> Self {
        Self::new(std::env::consts::OS)
    }

    pub fn new(os: &str) -> Self {
        Self {
            os: os.to_lowercase(),
        }
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }
}
