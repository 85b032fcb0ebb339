use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "workspace-run")]
#[command(about = "Run one shell command in every package directory of the workspace")]
pub struct CliConfig {
    /// Workspace root that package directories are resolved against
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// TOML file with the package list (defaults to <root>/workspace-run.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Show what would run without executing anything")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    /// Command to run; all trailing arguments are joined with spaces
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl CliConfig {
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("command", &self.command_line())?;
        validation::validate_path("root", &self.root.to_string_lossy())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_args_are_joined() {
        let config =
            CliConfig::parse_from(["workspace-run", "cargo", "test", "--all-features", "-q"]);
        assert_eq!(config.command_line(), "cargo test --all-features -q");
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_options_before_command() {
        let config = CliConfig::parse_from([
            "workspace-run",
            "--root",
            "/ws",
            "--dry-run",
            "-v",
            "cargo",
            "build",
            "-v",
        ]);
        assert_eq!(config.root, PathBuf::from("/ws"));
        assert!(config.dry_run);
        assert!(config.verbose);
        assert_eq!(config.command_line(), "cargo build -v");
    }

    #[test]
    fn test_command_is_required() {
        assert!(CliConfig::try_parse_from(["workspace-run"]).is_err());
    }
}
