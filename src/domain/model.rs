use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 預設的套件清單，依定義順序執行
pub const DEFAULT_PACKAGES: &[&str] = &[
    "core",
    "bin/oay",
    "bindings/java",
    "bindings/python",
    "bindings/dotnet",
    "integrations/cloudfilter",
    "integrations/unftp-sbe",
    "integrations/virtiofs",
];

/// 只能在 Windows 上建置的套件
pub const DEFAULT_WINDOWS_ONLY: &[&str] = &["integrations/cloudfilter"];

pub const DEFAULT_MANIFEST: &str = "Cargo.toml";

pub const DEFAULT_MANIFEST_COMMANDS: &[&str] = &["cargo"];

/// Ordered, immutable list of package directories relative to the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageList(Vec<String>);

impl PackageList {
    pub fn new(directories: Vec<String>) -> Self {
        Self(directories)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for PackageList {
    fn default() -> Self {
        Self(DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect())
    }
}

/// Resolves `directory` against `root`, leaving `.` components out.
pub fn resolve_directory(root: &Path, directory: &str) -> PathBuf {
    let relative: PathBuf = Path::new(directory)
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect();
    root.join(relative)
}

/// Normalised form used when comparing configured directories.
pub fn normalize_directory(directory: &str) -> String {
    directory
        .replace('\\', "/")
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    WindowsOnly,
    MissingManifest { manifest: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::WindowsOnly => write!(f, "it only builds on Windows"),
            SkipReason::MissingManifest { manifest } => write!(f, "`{}` not exist", manifest),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    Executed { duration: Duration },
    Skipped(SkipReason),
    /// Dry run: would have been executed.
    Planned,
}

#[derive(Debug, Clone)]
pub struct PackageResult {
    pub directory: String,
    pub outcome: PackageOutcome,
}

/// 一次執行的結果，依清單順序排列
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub command: String,
    pub results: Vec<PackageResult>,
}

impl RunReport {
    pub fn new(command: String) -> Self {
        Self {
            command,
            results: Vec::new(),
        }
    }

    pub fn executed(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, PackageOutcome::Executed { .. }))
            .map(|r| r.directory.as_str())
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            PackageOutcome::Skipped(reason) => Some((r.directory.as_str(), reason)),
            _ => None,
        })
    }

    pub fn planned(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, PackageOutcome::Planned))
            .map(|r| r.directory.as_str())
    }

    pub fn total_duration(&self) -> Duration {
        self.results
            .iter()
            .map(|r| match r.outcome {
                PackageOutcome::Executed { duration } => duration,
                _ => Duration::ZERO,
            })
            .sum()
    }

    /// 獲取執行摘要
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "command": self.command,
            "executed": self.executed().collect::<Vec<_>>(),
            "skipped": self.skipped().map(|(dir, _)| dir).collect::<Vec<_>>(),
            "planned": self.planned().collect::<Vec<_>>(),
            "total_duration_ms": self.total_duration().as_millis() as u64,
        })
    }
}

/// One row of the version table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageVersion {
    pub directory: String,
    pub current: String,
    pub next: String,
}
