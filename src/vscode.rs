//! Export to the VS Code "Project Manager" extension.
//!
//! The extension keeps its saved projects in a `projects.json` array. Only the
//! fields repohome writes are modelled; anything else on an existing entry is
//! carried through untouched. Export is merge-by-replacement keyed on
//! `rootPath`: entries for exported repositories are dropped and fresh ones
//! appended, all other entries are left alone.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filesystem;

/// One saved project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub name: String,
    pub root_path: String,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn enabled_default() -> bool {
    true
}

impl ProjectDescriptor {
    /// Descriptor for `repo`, named by its path relative to `root`.
    pub fn for_repository(root: &Path, repo: &Path) -> Self {
        let name = match repo.strip_prefix(root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative.to_string_lossy(),
            _ => repo.to_string_lossy(),
        };
        Self {
            name: name.replace('\\', "/"),
            root_path: repo.to_string_lossy().into_owned(),
            paths: Vec::new(),
            tags: Vec::new(),
            enabled: true,
            extra: serde_json::Map::new(),
        }
    }
}

/// What an export changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Descriptors written for exported repositories.
    pub exported: usize,
    /// Existing descriptors that were replaced.
    pub replaced: usize,
    /// Existing descriptors kept as they were.
    pub kept: usize,
}

/// Read the project list; a missing file is an empty list.
pub fn load_projects(path: &Path) -> Result<Vec<ProjectDescriptor>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read(path).map_err(|e| export_error(path, e))?;
    if contents.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(&contents).map_err(|e| export_error(path, e))
}

/// Replace and append descriptors for `repositories`.
pub fn merge_projects(
    existing: Vec<ProjectDescriptor>,
    root: &Path,
    repositories: &[PathBuf],
) -> (Vec<ProjectDescriptor>, ExportSummary) {
    let fresh: Vec<ProjectDescriptor> = repositories
        .iter()
        .map(|repo| ProjectDescriptor::for_repository(root, repo))
        .collect();
    let exported: HashSet<&str> = fresh.iter().map(|p| p.root_path.as_str()).collect();

    let before = existing.len();
    let mut merged: Vec<ProjectDescriptor> = existing
        .into_iter()
        .filter(|project| !exported.contains(project.root_path.as_str()))
        .collect();
    let kept = merged.len();

    let summary = ExportSummary {
        exported: fresh.len(),
        replaced: before - kept,
        kept,
    };
    merged.extend(fresh);
    (merged, summary)
}

/// Merge `repositories` into the project file at `path` and write it back.
pub fn export(path: &Path, root: &Path, repositories: &[PathBuf]) -> Result<ExportSummary> {
    let existing = load_projects(path)?;
    let (merged, summary) = merge_projects(existing, root, repositories);

    let bytes = filesystem::to_tab_json(&merged).map_err(|e| export_error(path, e))?;
    filesystem::write_atomic(path, &bytes).map_err(|e| export_error(path, e))?;
    log::debug!(
        "wrote {} projects to {}",
        merged.len(),
        path.display()
    );
    Ok(summary)
}

fn export_error(path: &Path, error: impl ToString) -> Error {
    Error::Export {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
