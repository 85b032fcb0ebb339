use crate::domain::model::{resolve_directory, PackageList, PackageVersion};
use crate::utils::error::{Result, WorkspaceError};
use std::path::Path;

/// Increments the last dot-separated component: `0.45.1` -> `0.45.2`.
pub fn next_patch_version(version: &str) -> Result<String> {
    let mut parts: Vec<String> = version.trim().split('.').map(str::to_string).collect();
    let last = parts.last_mut().ok_or_else(|| WorkspaceError::InvalidVersion {
        version: version.to_string(),
    })?;
    let patch: u64 = last.parse().map_err(|_| WorkspaceError::InvalidVersion {
        version: version.to_string(),
    })?;
    let next = patch.checked_add(1).ok_or_else(|| WorkspaceError::InvalidVersion {
        version: version.to_string(),
    })?;
    *last = next.to_string();
    Ok(parts.join("."))
}

fn read_toml(path: &Path) -> Result<toml::Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| WorkspaceError::ManifestError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// `workspace.package.version` from the root Cargo.toml.
fn workspace_cargo_version(root: &Path) -> Result<Option<String>> {
    let manifest = root.join("Cargo.toml");
    if !manifest.is_file() {
        return Ok(None);
    }
    let value = read_toml(&manifest)?;
    Ok(value
        .get("workspace")
        .and_then(|w| w.get("package"))
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str())
        .map(str::to_string))
}

fn cargo_version(root: &Path, manifest: &Path) -> Result<Option<String>> {
    let value = read_toml(manifest)?;
    let version = match value.get("package").and_then(|p| p.get("version")) {
        Some(version) => version,
        None => return Ok(None),
    };

    if let Some(version) = version.as_str() {
        return Ok(Some(version.to_string()));
    }

    // version.workspace = true
    let inherits = version
        .get("workspace")
        .and_then(|w| w.as_bool())
        .unwrap_or(false);
    if inherits {
        return workspace_cargo_version(root);
    }

    Err(WorkspaceError::ManifestError {
        path: manifest.to_path_buf(),
        message: "package.version must be a string or `{ workspace = true }`".to_string(),
    })
}

fn pyproject_version(manifest: &Path) -> Result<Option<String>> {
    let value = read_toml(manifest)?;
    let version = value
        .get("project")
        .and_then(|p| p.get("version"))
        .or_else(|| {
            value
                .get("tool")
                .and_then(|t| t.get("poetry"))
                .and_then(|p| p.get("version"))
        })
        .and_then(|v| v.as_str())
        .map(str::to_string);
    Ok(version)
}

fn package_json_version(manifest: &Path) -> Result<Option<String>> {
    let content = std::fs::read_to_string(manifest)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    Ok(value
        .get("version")
        .and_then(|v| v.as_str())
        .map(str::to_string))
}

/// 讀取套件目前的版本：Cargo.toml、pyproject.toml、package.json 依序嘗試
pub fn read_package_version(root: &Path, directory: &str) -> Result<String> {
    let package_dir = resolve_directory(root, directory);

    let cargo = package_dir.join("Cargo.toml");
    if cargo.is_file() {
        if let Some(version) = cargo_version(root, &cargo)? {
            return Ok(version);
        }
    }

    let pyproject = package_dir.join("pyproject.toml");
    if pyproject.is_file() {
        if let Some(version) = pyproject_version(&pyproject)? {
            return Ok(version);
        }
    }

    let package_json = package_dir.join("package.json");
    if package_json.is_file() {
        if let Some(version) = package_json_version(&package_json)? {
            return Ok(version);
        }
    }

    Err(WorkspaceError::VersionNotFound {
        directory: directory.to_string(),
    })
}

pub fn collect_versions(root: &Path, packages: &PackageList) -> Result<Vec<PackageVersion>> {
    packages
        .iter()
        .map(|directory| {
            let current = read_package_version(root, directory)?;
            let next = next_patch_version(&current)?;
            tracing::debug!("{}: {} -> {}", directory, current, next);
            Ok(PackageVersion {
                directory: directory.to_string(),
                current,
                next,
            })
        })
        .collect()
}

pub fn render_markdown_table(rows: &[PackageVersion]) -> String {
    let mut table = format!("| {:<25} | {:<7} | {:<7} |\n", "Name", "Version", "Next");
    table.push_str(&format!("| {:<25} | {:<7} | {:<7} |\n", "-", "-", "-"));
    for row in rows {
        table.push_str(&format!(
            "| {:<25} | {:<7} | {:<7} |\n",
            row.directory, row.current, row.next
        ));
    }
    table
}
