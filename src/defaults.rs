//! Default values for repohome configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Name of the directory that marks a git repository root.
pub const METADATA_DIR: &str = ".git";

/// Placeholder replaced with the root directory in batch command arguments.
pub const ROOT_PLACEHOLDER: &str = "{root}";

/// Placeholder replaced with the current repository in batch command arguments.
pub const REPO_PLACEHOLDER: &str = "{repo}";

/// Environment variable exported to batch commands and hooks with the root.
pub const ROOT_ENV: &str = "REPOHOME_ROOT";

/// Environment variable exported to batch commands and hooks with the repository.
pub const REPO_ENV: &str = "REPOHOME_REPO";

/// `git config` section holding repohome settings.
pub const CONFIG_SECTION: &str = "repohome";

/// Returns the default root directory for managed repositories.
///
/// `~/repos`, or `repos` in the current directory if the home directory
/// cannot be determined.
///
/// This can be overridden by `repohome.root` in git config, the `--root`
/// CLI flag or the `REPOHOME_ROOT` environment variable.
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("repos")
}

/// Returns the default location of the repository index.
///
/// Uses the platform-appropriate data directory:
/// - Linux: `~/.local/share/repohome/repositories.json`
/// - macOS: `~/Library/Application Support/repohome/repositories.json`
/// - Windows: `{FOLDERID_RoamingAppData}\repohome\repositories.json`
///
/// Falls back to `.repohome` in the current directory if the platform data
/// directory cannot be determined.
pub fn default_index_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from(".repohome"))
        .join("repohome")
        .join("repositories.json")
}

/// Returns the default `projects.json` of the VS Code Project Manager extension.
pub fn default_vscode_projects_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("Code")
        .join("User")
        .join("globalStorage")
        .join("alefragnani.project-manager")
        .join("projects.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root_ends_with_repos() {
        assert!(default_root().ends_with("repos"));
    }

    #[test]
    fn test_default_index_path_is_json_under_repohome() {
        let path = default_index_path();
        assert!(path.ends_with("repohome/repositories.json"));
    }

    #[test]
    fn test_default_vscode_projects_path() {
        let path = default_vscode_projects_path();
        assert!(path.ends_with("alefragnani.project-manager/projects.json"));
    }
}
