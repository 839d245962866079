//! Discovery of repositories below a directory tree.
//!
//! A directory that directly contains a `.git` directory is a repository
//! root. Once one is found the walk does not descend into it, so nested
//! repositories (submodules, vendored checkouts) never show up separately.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::filesystem::is_repository;
use crate::index::sort_case_insensitive;

/// Find every repository root below `root`, sorted case-insensitively.
pub fn scan(root: &Path) -> Result<Vec<PathBuf>> {
    scan_with_progress(root, |_| {})
}

/// Like [`scan`], calling `on_dir` for every directory visited.
pub fn scan_with_progress<F>(root: &Path, mut on_dir: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path),
{
    if !root.is_dir() {
        return Err(Error::RootMissing {
            path: root.to_path_buf(),
        });
    }

    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).follow_links(false).into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        on_dir(entry.path());
        if is_repository(entry.path()) {
            log::debug!("found repository {}", entry.path().display());
            found.push(entry.path().to_path_buf());
            walker.skip_current_dir();
        }
    }

    sort_case_insensitive(&mut found);
    Ok(found)
}
