//! # Repository Index
//!
//! The index is the list of repositories repohome knows about. It lives in a
//! single JSON document:
//!
//! ```json
//! {
//! 	"repositories": [
//! 		"/home/me/repos/github.com/org/a",
//! 		"/home/me/repos/github.com/org/b"
//! 	]
//! }
//! ```
//!
//! Entries are unique and kept in case-insensitive order. Every mutation is a
//! read-modify-write of the whole document; there is no locking, so two
//! processes mutating at once may lose one of the updates.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filesystem;

/// On-disk shape of the index document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct IndexDocument {
    repositories: Vec<PathBuf>,
}

/// JSON-backed list of repository paths.
#[derive(Debug, Clone)]
pub struct RepositoryIndex {
    path: PathBuf,
}

impl RepositoryIndex {
    /// Create an index backed by the document at `path`.
    ///
    /// Nothing is read or created until the first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all entries, creating an empty document first if none exists.
    pub fn load(&self) -> Result<Vec<PathBuf>> {
        if !self.path.exists() {
            log::debug!("creating empty index at {}", self.path.display());
            self.write(&[])?;
            return Ok(Vec::new());
        }

        let contents = fs::read(&self.path).map_err(|e| Error::index(&self.path, e))?;
        let document: IndexDocument =
            serde_json::from_slice(&contents).map_err(|e| Error::index(&self.path, e))?;
        Ok(document.repositories)
    }

    /// Load entries and drop the ones that no longer exist on disk.
    ///
    /// Stale entries are skipped here, not removed from the document.
    pub fn list_existing(&self) -> Result<Vec<PathBuf>> {
        let entries = self.load()?;
        Ok(entries
            .into_iter()
            .filter(|path| {
                let exists = path.exists();
                if !exists {
                    log::debug!("skipping stale index entry {}", path.display());
                }
                exists
            })
            .collect())
    }

    /// Apply `transform` to the raw entries and persist the result.
    ///
    /// The transformed list is deduplicated and sorted before it replaces the
    /// whole document. Returns the entries as written.
    pub fn mutate<F>(&self, transform: F) -> Result<Vec<PathBuf>>
    where
        F: FnOnce(&mut Vec<PathBuf>),
    {
        let mut entries = self.load()?;
        transform(&mut entries);
        let entries = normalize(entries);
        self.write(&entries)?;
        Ok(entries)
    }

    /// Add `path` to the index.
    pub fn add(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.mutate(|entries| entries.push(path.to_path_buf()))
    }

    /// Remove every occurrence of `path` from the index.
    pub fn remove(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.mutate(|entries| entries.retain(|entry| entry != path))
    }

    /// Replace the entire contents of the index with `paths`.
    pub fn replace(&self, paths: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        self.mutate(move |entries| *entries = paths)
    }

    fn write(&self, entries: &[PathBuf]) -> Result<()> {
        let document = IndexDocument {
            repositories: entries.to_vec(),
        };
        let bytes = filesystem::to_tab_json(&document).map_err(|e| Error::index(&self.path, e))?;
        filesystem::write_atomic(&self.path, &bytes).map_err(|e| Error::index(&self.path, e))
    }
}

/// Deduplicate and sort paths case-insensitively.
///
/// Each path is rebuilt from its components first, so `/r/a/` and `/r/a`
/// collapse into one entry. Paths that differ only in case are distinct
/// entries; they are ordered by their exact spelling so the order is total.
pub fn normalize(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = paths
        .into_iter()
        .map(|path| path.components().collect())
        .collect();
    sort_case_insensitive(&mut paths);
    paths.dedup();
    paths
}

/// Sort paths in case-insensitive lexicographic order.
pub fn sort_case_insensitive(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|path| {
        let text = path.to_string_lossy().into_owned();
        (text.to_lowercase(), text)
    });
}
