use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to spawn '{command}' in {directory}: {source}")]
    SpawnError {
        directory: String,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' failed in {directory} with {}", describe_exit(.code))]
    CommandFailed {
        directory: String,
        command: String,
        code: Option<i32>,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No version found for package {directory}")]
    VersionNotFound { directory: String },

    #[error("Version '{version}' has no numeric patch component that can be incremented")]
    InvalidVersion { version: String },

    #[error("Malformed manifest {}: {message}", .path.display())]
    ManifestError { path: PathBuf, message: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl WorkspaceError {
    /// 程序結束時使用的退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            WorkspaceError::CommandFailed { code, .. } => match code {
                Some(code) if *code != 0 => *code,
                _ => 1,
            },
            WorkspaceError::ConfigError { .. } | WorkspaceError::InvalidConfigValueError { .. } => 2,
            _ => 1,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WorkspaceError::CommandFailed { .. } => {
                "Fix the failing package and re-run; later packages were not processed"
            }
            WorkspaceError::SpawnError { .. } => {
                "Check that the package directory exists and the shell is available"
            }
            WorkspaceError::ConfigError { .. } | WorkspaceError::InvalidConfigValueError { .. } => {
                "Check the package list in the configuration file"
            }
            WorkspaceError::VersionNotFound { .. }
            | WorkspaceError::ManifestError { .. }
            | WorkspaceError::InvalidVersion { .. } => {
                "Make sure every package has a Cargo.toml, pyproject.toml or package.json with a version"
            }
            WorkspaceError::IoError(_) | WorkspaceError::SerializationError(_) => {
                "Check file permissions and paths"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;
