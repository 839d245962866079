//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Following CLI recommendations,
//! errors should tell users what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use repohome::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Root directory does not exist: {}", root.display());
//!
//! // Use:
//! return Err(suggestions::root_missing(root));
//! ```

use std::path::{Path, PathBuf};

use crate::error::Error;

/// Convert a library error into a user-facing error with hints.
pub fn explain(error: Error) -> anyhow::Error {
    match error {
        Error::RootMissing { path } => root_missing(&path),
        Error::Index { path, message } => index_unusable(&path, &message),
        Error::UrlParse { url, .. } => unrecognized_url(&url),
        Error::Usage { input } => invalid_answer(&input),
        Error::CloneTarget { path } => clone_target_occupied(&path),
        other => anyhow::Error::new(other),
    }
}

/// Generate an error for when the root directory is missing.
///
/// Includes hints about the ways to configure the root.
pub fn root_missing(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Root directory does not exist: {path}\n\n\
         hint: Clone a repository with 'repohome clone <URL>' to create it\n\
         hint: Use --root to point at a different directory\n\
         hint: Set REPOHOME_ROOT or 'git config --global repohome.root <DIR>'",
        path = path.display()
    )
}

/// Generate an error for an index file that cannot be read or written.
pub fn index_unusable(path: &Path, message: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Repository index at {path} is unusable\n\
         error: {message}\n\n\
         hint: Run 'repohome rebuild' to recreate the index from the root directory\n\
         hint: Use --index or REPOHOME_INDEX to use a different file",
        path = path.display()
    )
}

/// Generate an error for a URL in none of the supported forms.
pub fn unrecognized_url(url: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unrecognized repository URL: {url}\n\n\
         hint: Use scheme://[user@]host[:port]/path, e.g. https://github.com/org/repo.git\n\
         hint: Or the scp-like form user@host:path, e.g. git@github.com:org/repo.git"
    )
}

/// Generate an error for an unexpected confirmation answer.
pub fn invalid_answer(input: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unexpected answer {input:?}\n\n\
         hint: Answer 'y' to remove or 'n' to keep the repository\n\
         hint: Pass --yes to skip the prompt"
    )
}

/// Generate an error for a clone target occupied by a non-repository.
pub fn clone_target_occupied(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Clone target {path} already exists and is not a git repository\n\n\
         hint: Move or delete the directory and clone again",
        path = path.display()
    )
}

/// Generate an error for a path that is not a known repository.
///
/// Suggests the closest indexed repository, if any is close enough.
pub fn repository_not_found(target: &Path, known: &[PathBuf]) -> anyhow::Error {
    let target_text = target.to_string_lossy();
    let candidates: Vec<String> = known
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    let candidate_refs: Vec<&str> = candidates.iter().map(String::as_str).collect();

    let did_you_mean = find_similar(&target_text, &candidate_refs)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Not a managed repository: {target_text}{did_you_mean}\n\n\
         hint: Run 'repohome list' to see managed repositories"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // single rolling row
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
