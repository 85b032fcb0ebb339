use crate::config::WorkspaceConfig;
use crate::domain::model::{resolve_directory, SkipReason};
use crate::domain::ports::HostPlatform;
use std::path::Path;

/// Decides whether `directory` must be skipped for `command`.
///
/// The Windows-only rule is checked first, so a Windows-only package lacking
/// its manifest is reported as Windows-only on other hosts.
pub fn skip_reason(
    config: &WorkspaceConfig,
    platform: &HostPlatform,
    root: &Path,
    directory: &str,
    command: &str,
) -> Option<SkipReason> {
    if !platform.is_windows() && config.is_windows_only(directory) {
        return Some(SkipReason::WindowsOnly);
    }

    if config.is_manifest_command(command) {
        let manifest = resolve_directory(root, directory).join(config.manifest());
        if !manifest.exists() {
            return Some(SkipReason::MissingManifest {
                manifest: config.manifest().to_string(),
            });
        }
    }

    None
}
