//! Mapping of remote repository URLs onto paths under the root
//!
//! Two forms are recognized, tried in order:
//!
//! 1. `scheme://[user@]host[:port]/path...` for any scheme
//! 2. `[ssh://]user@host:path...` (scp-like syntax)
//!
//! The host becomes the first path component, the remote path follows and a
//! trailing `.git` is dropped. No case folding and no filesystem access take
//! place, so mapping is a pure function of the URL and the root.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static SCHEME_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://(?:[^@/]*@)?([^/:@]+)(?::\d*)?(/.*)?$")
        .expect("scheme URL pattern is valid")
});

static SCP_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:ssh://)?[^@/:]+@([^/:@]+):(.*)$").expect("scp URL pattern is valid")
});

/// Host and path segments of a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocation {
    pub host: String,
    pub segments: Vec<String>,
}

impl RemoteLocation {
    /// `host/seg/...` as a relative path.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::from(&self.host);
        for segment in &self.segments {
            path.push(segment);
        }
        path
    }
}

/// Parse a remote URL into its host and path segments.
pub fn parse_remote(url: &str) -> Result<RemoteLocation> {
    let trimmed = url.trim();

    let (host, raw_path) = if let Some(captures) = SCHEME_FORM.captures(trimmed) {
        (
            captures[1].to_string(),
            captures.get(2).map_or("", |m| m.as_str()),
        )
    } else if let Some(captures) = SCP_FORM.captures(trimmed) {
        (
            captures[1].to_string(),
            captures.get(2).map_or("", |m| m.as_str()),
        )
    } else {
        return Err(unrecognized(url));
    };

    if is_traversal(&host) {
        return Err(unrecognized(url));
    }

    let segments = split_segments(raw_path).ok_or_else(|| unrecognized(url))?;
    Ok(RemoteLocation { host, segments })
}

/// Map a remote URL to its canonical location under `root`.
///
/// `root / host / path...`, with the trailing `.git` removed.
pub fn map_url(url: &str, root: &Path) -> Result<PathBuf> {
    let location = parse_remote(url)?;
    Ok(root.join(location.relative_path()))
}

/// Split the path part of a URL, dropping empty segments and the `.git` suffix.
///
/// Returns `None` when nothing is left or a segment would walk out of the root.
fn split_segments(raw_path: &str) -> Option<Vec<String>> {
    let trimmed = raw_path.trim_end_matches('/');
    let without_suffix = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let segments: Vec<String> = without_suffix
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    if segments.is_empty() || segments.iter().any(|s| is_traversal(s)) {
        return None;
    }
    Some(segments)
}

fn is_traversal(component: &str) -> bool {
    component == "." || component == ".."
}

fn unrecognized(url: &str) -> Error {
    Error::UrlParse {
        url: url.to_string(),
        hint: Some("Use scheme://host/path (e.g. https://github.com/org/repo.git) or user@host:path (e.g. git@github.com:org/repo.git)".to_string()),
    }
}
