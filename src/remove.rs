//! # Repository Removal
//!
//! Removing a repository walks a fixed sequence of steps:
//!
//! ```text
//! Validate -> Confirm -> Execute -> Cleanup -> Done
//!     |          |
//!     +----------+--> Aborted
//! ```
//!
//! - **Validate**: the target must exist, be a repository and sit strictly
//!   below the root. Containment compares path components, so `/r2/x` is not
//!   inside `/r`.
//! - **Confirm**: the answer is parsed once into a [`Confirmation`]. `n`
//!   aborts cleanly, anything other than `y` or `n` is a usage error.
//! - **Execute**: the `remove.pre` hook runs in the repository, then the tree
//!   is deleted.
//! - **Cleanup**: directories left empty are removed upward, stopping below
//!   the root.
//! - **Done**: the path is dropped from the index and the `remove.post` hook
//!   runs from the root.
//!
//! Validation and confirmation failures leave the disk and the index as they
//! were.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Operation, Settings, Stage};
use crate::error::{Error, Result};
use crate::filesystem::{self, is_repository, lexical_absolute};
use crate::hooks::{run_hook, HookContext};
use crate::index::RepositoryIndex;
use crate::runner::CommandRunner;

/// Answer to the removal prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Invalid(String),
}

impl Confirmation {
    /// Parse a typed answer. Surrounding whitespace is ignored; the answer
    /// itself must be exactly `y` or `n`.
    pub fn parse(answer: &str) -> Self {
        match answer.trim() {
            "y" => Confirmation::Yes,
            "n" => Confirmation::No,
            other => Confirmation::Invalid(other.to_string()),
        }
    }
}

/// Steps of a removal, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Validate,
    Confirm,
    Execute,
    Cleanup,
    Done,
    Aborted,
}

/// How a removal ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The repository is gone and unregistered.
    Removed {
        path: PathBuf,
        /// Empty parent directories removed during cleanup.
        cleaned: Vec<PathBuf>,
    },
    /// The user declined.
    Aborted { path: PathBuf },
}

/// Check that `target` may be removed and return its absolute path.
pub fn validate(root: &Path, target: &Path) -> Result<PathBuf> {
    let path = lexical_absolute(target)?;
    let root = lexical_absolute(root)?;

    if !path.exists() {
        return Err(Error::validation(&path, "path does not exist"));
    }
    if !is_repository(&path) {
        return Err(Error::validation(&path, "not a git repository"));
    }
    if path == root || !path.starts_with(&root) {
        return Err(Error::validation(
            &path,
            format!("not inside the root directory {}", root.display()),
        ));
    }
    Ok(path)
}

/// Removes repositories below the configured root.
pub struct Remover<'a, R: CommandRunner + ?Sized> {
    settings: &'a Settings,
    index: &'a RepositoryIndex,
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> Remover<'a, R> {
    pub fn new(settings: &'a Settings, index: &'a RepositoryIndex, runner: &'a R) -> Self {
        Self {
            settings,
            index,
            runner,
        }
    }

    /// Remove `target`, asking `confirm` for permission after validation.
    ///
    /// `confirm` is only called once the target passed validation.
    pub fn remove<F>(&self, target: &Path, confirm: F) -> Result<RemoveOutcome>
    where
        F: FnOnce(&Path) -> Result<Confirmation>,
    {
        let root = lexical_absolute(&self.settings.root)?;

        log::debug!("{:?}: {}", Step::Validate, target.display());
        let path = validate(&root, target)?;

        log::debug!("{:?}: {}", Step::Confirm, path.display());
        match confirm(&path)? {
            Confirmation::Yes => {}
            Confirmation::No => {
                log::debug!("{:?}: {}", Step::Aborted, path.display());
                return Ok(RemoveOutcome::Aborted { path });
            }
            Confirmation::Invalid(input) => return Err(Error::Usage { input }),
        }

        log::debug!("{:?}: {}", Step::Execute, path.display());
        run_hook(
            self.runner,
            &self.settings.hooks,
            Operation::Remove,
            Stage::Pre,
            HookContext {
                root: &root,
                repo: &path,
                cwd: &path,
            },
        );
        fs::remove_dir_all(&path)?;

        log::debug!("{:?}: {}", Step::Cleanup, path.display());
        let cleaned = match path.parent() {
            Some(parent) => filesystem::remove_empty_parents(parent, &root),
            None => Vec::new(),
        };

        self.index.remove(&path)?;
        run_hook(
            self.runner,
            &self.settings.hooks,
            Operation::Remove,
            Stage::Post,
            HookContext {
                root: &root,
                repo: &path,
                cwd: &root,
            },
        );
        log::debug!("{:?}: {}", Step::Done, path.display());

        Ok(RemoveOutcome::Removed { path, cleaned })
    }
}
