//! Filesystem helpers shared by the index, the scanner and the exporters.
//!
//! JSON documents are written the way editors and humans expect them:
//! pretty-printed with tab indentation. Every write goes to a temporary file
//! next to the destination which is then renamed over it, so a crash never
//! leaves a truncated document behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::defaults::METADATA_DIR;

/// Returns `true` if `dir` directly contains the git metadata directory.
pub fn is_repository(dir: &Path) -> bool {
    dir.join(METADATA_DIR).is_dir()
}

/// Serialize `value` as tab-indented JSON.
pub fn to_tab_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `contents` to `path` through a sibling temp file and a rename.
///
/// Parent directories are created when missing.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let temp_path = parent.join(format!(".{}.tmp-{}", file_name, std::process::id()));

    let result = (|| {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Remove empty directories upward from `start`, staying strictly below `root`.
///
/// Stops at the first directory that is not empty (or cannot be removed) and
/// never touches `root` itself. Returns the directories that were removed.
pub fn remove_empty_parents(start: &Path, root: &Path) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    let mut current = Some(start);

    while let Some(dir) = current {
        if dir == root || !dir.starts_with(root) {
            break;
        }
        let is_empty = match fs::read_dir(dir) {
            Ok(mut entries) => entries.next().is_none(),
            Err(_) => false,
        };
        if !is_empty || fs::remove_dir(dir).is_err() {
            break;
        }
        log::debug!("removed empty directory {}", dir.display());
        removed.push(dir.to_path_buf());
        current = dir.parent();
    }

    removed
}

/// Make `path` absolute without touching the filesystem.
///
/// Relative paths are resolved against the current directory and `.`/`..`
/// components are folded lexically; symlinks are left alone.
pub fn lexical_absolute(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            std::path::Component::ParentDir => {
                normalized.pop();
            }
            std::path::Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
