//! # High-Level Repository Management
//!
//! [`RepositoryManager`] ties the pieces together: it maps URLs onto the
//! root, drives git through a [`CommandRunner`], keeps the index in step with
//! what is on disk and fires the configured hooks.
//!
//! The runner is borrowed, so tests hand in a recorder and never spawn git.

use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::{run_batch, BatchReport};
use crate::config::{Operation, Settings, Stage};
use crate::error::{Error, Result};
use crate::filesystem::{is_repository, remove_empty_parents};
use crate::git::Git;
use crate::hooks::{run_hook, HookContext};
use crate::index::RepositoryIndex;
use crate::path::map_url;
use crate::runner::CommandRunner;
use crate::scanner;

/// Result of cloning one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneOutcome {
    /// A fresh clone was created.
    Cloned(PathBuf),
    /// The repository was already there; it was only re-registered.
    AlreadyPresent(PathBuf),
}

impl CloneOutcome {
    pub fn path(&self) -> &Path {
        match self {
            CloneOutcome::Cloned(path) | CloneOutcome::AlreadyPresent(path) => path,
        }
    }
}

/// Clone, rebuild and update operations over the root.
pub struct RepositoryManager<'a, R: CommandRunner + ?Sized> {
    settings: &'a Settings,
    index: &'a RepositoryIndex,
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> RepositoryManager<'a, R> {
    pub fn new(settings: &'a Settings, index: &'a RepositoryIndex, runner: &'a R) -> Self {
        Self {
            settings,
            index,
            runner,
        }
    }

    pub fn root(&self) -> &Path {
        &self.settings.root
    }

    /// Clone `url` to its canonical place below the root and register it.
    pub fn clone_url(&self, url: &str, with_submodules: bool) -> Result<CloneOutcome> {
        let root = self.root();
        let target = map_url(url, root)?;

        if is_repository(&target) {
            log::info!("{} already cloned at {}", url, target.display());
            self.index.add(&target)?;
            return Ok(CloneOutcome::AlreadyPresent(target));
        }

        fs::create_dir_all(root)?;
        self.hook(
            Stage::Pre,
            HookContext {
                root,
                repo: &target,
                cwd: root,
            },
        );

        if let Err(err) = Git::new(&target, self.runner).clone(url, with_submodules) {
            // never touch an occupied target
            if !matches!(err, Error::CloneTarget { .. }) {
                remove_empty_parents(&target, root);
            }
            return Err(err);
        }
        self.index.add(&target)?;

        self.hook(
            Stage::Post,
            HookContext {
                root,
                repo: &target,
                cwd: &target,
            },
        );
        Ok(CloneOutcome::Cloned(target))
    }

    /// Clone every URL, continuing past per-URL failures.
    ///
    /// `on_done` is called after each successful clone.
    pub fn clone_all<F>(
        &self,
        urls: &[String],
        with_submodules: bool,
        mut on_done: F,
    ) -> Result<BatchReport>
    where
        F: FnMut(&str, &CloneOutcome),
    {
        run_batch(
            urls,
            |url| url.clone(),
            |url| {
                let outcome = self.clone_url(url, with_submodules)?;
                on_done(url, &outcome);
                Ok(())
            },
        )
    }

    /// Rescan the root and overwrite the index with what was found.
    pub fn rebuild<F>(&self, on_dir: F) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&Path),
    {
        let found = scanner::scan_with_progress(self.root(), on_dir)?;
        self.index.replace(found)
    }

    /// Fetch and fast-forward each repository.
    pub fn update_all(&self, repositories: &[PathBuf]) -> Result<BatchReport> {
        run_batch(
            repositories,
            |repo| repo.display().to_string(),
            |repo| Git::new(repo, self.runner).update(),
        )
    }

    /// Switch each repository to `name` and bring it up to date.
    pub fn switch_all(
        &self,
        repositories: &[PathBuf],
        name: &str,
        is_tag: bool,
    ) -> Result<BatchReport> {
        run_batch(
            repositories,
            |repo| repo.display().to_string(),
            |repo| Git::new(repo, self.runner).switch_and_update(name, is_tag),
        )
    }

    fn hook(&self, stage: Stage, context: HookContext<'_>) {
        run_hook(
            self.runner,
            &self.settings.hooks,
            Operation::Clone,
            stage,
            context,
        );
    }
}
