use crate::config::WorkspaceConfig;
use crate::core::skip::skip_reason;
use crate::domain::model::{resolve_directory, PackageOutcome, PackageResult, RunReport};
use crate::domain::ports::{CommandRunner, HostPlatform};
use crate::utils::error::{Result, WorkspaceError};
use std::path::PathBuf;
use std::time::Instant;

/// 依清單順序在每個套件目錄執行同一個指令，遇到第一個失敗即停止
pub struct WorkspaceRunner<R: CommandRunner> {
    runner: R,
    config: WorkspaceConfig,
    platform: HostPlatform,
    root: PathBuf,
    dry_run: bool,
}

impl<R: CommandRunner> WorkspaceRunner<R> {
    pub fn new(runner: R, config: WorkspaceConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            config,
            platform: HostPlatform::current(),
            root: root.into(),
            dry_run: false,
        }
    }

    pub fn with_platform(mut self, platform: HostPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// 只套用跳過規則，不實際執行指令
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub async fn run(&self, command: &str) -> Result<RunReport> {
        let mut report = RunReport::new(command.to_string());

        tracing::debug!(
            "Running '{}' across {} packages (root: {}, os: {})",
            command,
            self.config.packages().len(),
            self.root.display(),
            self.platform.os()
        );

        for directory in self.config.packages().iter() {
            tracing::info!("Executing '{}' in {}", command, directory);

            if let Some(reason) =
                skip_reason(&self.config, &self.platform, &self.root, directory, command)
            {
                tracing::info!("⏭️ Skip {} because {}", directory, reason);
                report.results.push(PackageResult {
                    directory: directory.to_string(),
                    outcome: PackageOutcome::Skipped(reason),
                });
                continue;
            }

            if self.dry_run {
                tracing::info!("🔍 Would run '{}' in {}", command, directory);
                report.results.push(PackageResult {
                    directory: directory.to_string(),
                    outcome: PackageOutcome::Planned,
                });
                continue;
            }

            let start_time = Instant::now();
            let working_dir = resolve_directory(&self.root, directory);
            let status = self.runner.run(command, &working_dir).await?;
            let duration = start_time.elapsed();

            if !status.success {
                tracing::error!(
                    "❌ '{}' failed in {} (exit code: {:?})",
                    command,
                    directory,
                    status.code
                );
                return Err(WorkspaceError::CommandFailed {
                    directory: directory.to_string(),
                    command: command.to_string(),
                    code: status.code,
                });
            }

            tracing::debug!("✅ {} finished in {:?}", directory, duration);
            report.results.push(PackageResult {
                directory: directory.to_string(),
                outcome: PackageOutcome::Executed { duration },
            });
        }

        tracing::debug!("📊 Run summary: {}", report.summary());

        Ok(report)
    }
}
