use crate::domain::model::{
    normalize_directory, PackageList, DEFAULT_MANIFEST, DEFAULT_MANIFEST_COMMANDS,
    DEFAULT_WINDOWS_ONLY,
};
use crate::utils::error::{Result, WorkspaceError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 工作區根目錄下自動載入的設定檔名稱
pub const CONFIG_FILE_NAME: &str = "workspace-run.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub workspace: WorkspaceSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSection {
    pub packages: PackageList,
    pub windows_only: Option<Vec<String>>,
    pub manifest: Option<String>,
    pub manifest_commands: Option<Vec<String>>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            workspace: WorkspaceSection {
                packages: PackageList::default(),
                windows_only: None,
                manifest: None,
                manifest_commands: None,
            },
        }
    }
}

impl WorkspaceConfig {
    /// 依序嘗試：指定的設定檔、根目錄下的 workspace-run.toml、內建預設值
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!("Loading package list from {}", path.display());
            return Self::from_file(path);
        }

        let discovered: PathBuf = root.join(CONFIG_FILE_NAME);
        if discovered.is_file() {
            tracing::debug!("Loading package list from {}", discovered.display());
            return Self::from_file(&discovered);
        }

        tracing::debug!("No {} found, using built-in package list", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| WorkspaceError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WorkspaceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EXTRA_PACKAGE})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| WorkspaceError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn packages(&self) -> &PackageList {
        &self.workspace.packages
    }

    pub fn windows_only(&self) -> Vec<String> {
        match &self.workspace.windows_only {
            Some(dirs) => dirs.iter().map(|d| normalize_directory(d)).collect(),
            None => DEFAULT_WINDOWS_ONLY.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn is_windows_only(&self, directory: &str) -> bool {
        let directory = normalize_directory(directory);
        self.windows_only().iter().any(|d| *d == directory)
    }

    pub fn manifest(&self) -> &str {
        self.workspace.manifest.as_deref().unwrap_or(DEFAULT_MANIFEST)
    }

    pub fn manifest_commands(&self) -> Vec<String> {
        match &self.workspace.manifest_commands {
            Some(prefixes) => prefixes.clone(),
            None => DEFAULT_MANIFEST_COMMANDS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    /// 指令是否需要 manifest 才能執行 (例如 cargo 需要 Cargo.toml)
    pub fn is_manifest_command(&self, command: &str) -> bool {
        let command = command.trim_start();
        self.manifest_commands()
            .iter()
            .any(|prefix| command.starts_with(prefix.as_str()))
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.packages().is_empty() {
            return Err(WorkspaceError::ConfigError {
                message: "workspace.packages must list at least one directory".to_string(),
            });
        }

        for directory in self.packages().iter() {
            validation::validate_relative_path("workspace.packages", directory)?;
        }
        let normalized: Vec<String> = self.packages().iter().map(normalize_directory).collect();
        validation::validate_unique("workspace.packages", &normalized)?;

        if let Some(dirs) = &self.workspace.windows_only {
            for directory in dirs {
                validation::validate_relative_path("workspace.windows_only", directory)?;
            }
        }

        validation::validate_non_empty_string("workspace.manifest", self.manifest())?;
        validation::validate_path("workspace.manifest", self.manifest())?;

        for prefix in self.manifest_commands() {
            validation::validate_non_empty_string("workspace.manifest_commands", &prefix)?;
        }

        Ok(())
    }
}

impl Validate for WorkspaceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[workspace]
packages = ["core", "bindings/python", "integrations/cloudfilter"]
windows_only = ["./integrations/cloudfilter"]
manifest = "Cargo.toml"
manifest_commands = ["cargo", "cross"]
"#;

        let config = WorkspaceConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.packages().len(), 3);
        assert_eq!(config.packages().iter().next(), Some("core"));
        assert!(config.is_windows_only("integrations/cloudfilter"));
        assert!(!config.is_windows_only("core"));
        assert!(config.is_manifest_command("cross build"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_optional_fields_missing() {
        let config = WorkspaceConfig::from_toml_str(
            r#"
[workspace]
packages = ["core"]
"#,
        )
        .unwrap();

        assert_eq!(config.manifest(), "Cargo.toml");
        assert!(config.is_manifest_command("cargo clippy"));
        assert!(config.is_manifest_command("  cargo fmt"));
        assert!(!config.is_manifest_command("make test"));
        assert!(config.is_windows_only("integrations/cloudfilter"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("WORKSPACE_RUN_TEST_PACKAGE", "bindings/nodejs");

        let toml_content = r#"
[workspace]
packages = ["core", "${WORKSPACE_RUN_TEST_PACKAGE}"]
"#;

        let config = WorkspaceConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.packages().as_slice(),
            &["core".to_string(), "bindings/nodejs".to_string()]
        );

        std::env::remove_var("WORKSPACE_RUN_TEST_PACKAGE");
    }

    #[test]
    fn test_unknown_env_var_left_as_written() {
        std::env::remove_var("WORKSPACE_RUN_UNSET_PACKAGE");

        let config = WorkspaceConfig::from_toml_str(
            "[workspace]\npackages = [\"core\", \"${WORKSPACE_RUN_UNSET_PACKAGE}\"]\n",
        )
        .unwrap();
        assert_eq!(
            config.packages().as_slice(),
            &[
                "core".to_string(),
                "${WORKSPACE_RUN_UNSET_PACKAGE}".to_string()
            ]
        );
    }

    #[test]
    fn test_config_validation() {
        let empty = WorkspaceConfig::from_toml_str("[workspace]\npackages = []\n").unwrap();
        assert!(empty.validate().is_err());

        let escaping =
            WorkspaceConfig::from_toml_str("[workspace]\npackages = [\"../other\"]\n").unwrap();
        assert!(escaping.validate().is_err());

        let duplicated =
            WorkspaceConfig::from_toml_str("[workspace]\npackages = [\"core\", \"core\"]\n")
                .unwrap();
        assert!(duplicated.validate().is_err());

        let same_directory =
            WorkspaceConfig::from_toml_str("[workspace]\npackages = [\"core\", \"./core/\"]\n")
                .unwrap();
        assert!(same_directory.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = WorkspaceConfig::from_toml_str("[workspace\npackages = ").unwrap_err();
        assert!(matches!(err, WorkspaceError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[workspace]\npackages = [\"core\", \"bin/oay\"]\n")
            .unwrap();

        let config = WorkspaceConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.packages().len(), 2);
    }

    #[test]
    fn test_load_discovers_file_in_root() {
        let root = TempDir::new().unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[workspace]\npackages = [\"only-one\"]\n",
        )
        .unwrap();

        let config = WorkspaceConfig::load(root.path(), None).unwrap();
        assert_eq!(config.packages().as_slice(), &["only-one".to_string()]);
    }

    #[test]
    fn test_explicit_config_takes_precedence() {
        let root = TempDir::new().unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[workspace]\npackages = [\"discovered\"]\n",
        )
        .unwrap();
        let explicit = root.path().join("ci.toml");
        std::fs::write(&explicit, "[workspace]\npackages = [\"explicit\"]\n").unwrap();

        let config = WorkspaceConfig::load(root.path(), Some(&explicit)).unwrap();
        assert_eq!(config.packages().as_slice(), &["explicit".to_string()]);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("missing.toml");

        let err = WorkspaceConfig::load(root.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, WorkspaceError::ConfigError { .. }));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let root = TempDir::new().unwrap();
        let config = WorkspaceConfig::load(root.path(), None).unwrap();
        assert_eq!(config.packages(), &PackageList::default());
    }
}
