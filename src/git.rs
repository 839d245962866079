//! Thin wrapper over the `git` command line.
//!
//! All commands go through a [`CommandRunner`] with inherited stdio, so
//! credential prompts and progress output reach the user unchanged. This
//! uses the system git, which automatically picks up SSH keys, credential
//! helpers and anything else configured in `~/.gitconfig`.

use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};

/// A local repository directory and the runner used to drive git in it.
pub struct Git<'a, R: CommandRunner + ?Sized> {
    local_dir: PathBuf,
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> Git<'a, R> {
    pub fn new(local_dir: impl Into<PathBuf>, runner: &'a R) -> Self {
        Self {
            local_dir: local_dir.into(),
            runner,
        }
    }

    /// Clone `url` into the local directory.
    ///
    /// Fails without running git if the directory already exists. Parent
    /// directories are created first.
    pub fn clone(&self, url: &str, with_submodules: bool) -> Result<()> {
        if self.local_dir.exists() {
            return Err(Error::CloneTarget {
                path: self.local_dir.clone(),
            });
        }
        if let Some(parent) = self.local_dir.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut invocation = Invocation::new("git").arg("clone");
        if with_submodules {
            invocation = invocation.arg("--recurse-submodules");
        }
        let invocation = invocation
            .arg(url)
            .arg(self.local_dir.to_string_lossy());
        self.execute(&invocation)
    }

    /// Fetch from every remote, then fast-forward the current branch.
    pub fn update(&self) -> Result<()> {
        self.fetch()?;
        self.fast_forward()
    }

    /// Check out `name` and bring it up to date.
    ///
    /// Tags are checked out detached. A tag that already exists locally is
    /// used as-is without fetching, since tags are not expected to move.
    /// Branches are fetched, switched to and fast-forwarded.
    pub fn switch_and_update(&self, name: &str, is_tag: bool) -> Result<()> {
        if is_tag {
            if !self.has_local_tag(name)? {
                self.fetch()?;
            }
            self.git(&["switch", "--detach", name])
        } else {
            self.fetch()?;
            self.git(&["switch", name])?;
            self.fast_forward()
        }
    }

    fn has_local_tag(&self, name: &str) -> Result<bool> {
        let invocation = self.git_invocation(&["tag", "--list", name]);
        let output = self.runner.capture(&invocation)?;
        output.outcome.check(&invocation)?;
        Ok(!output.stdout.trim().is_empty())
    }

    fn fetch(&self) -> Result<()> {
        self.git(&["fetch", "--all", "--prune", "--tags"])
    }

    fn fast_forward(&self) -> Result<()> {
        self.git(&["merge", "--ff-only"])
    }

    fn git(&self, args: &[&str]) -> Result<()> {
        self.execute(&self.git_invocation(args))
    }

    fn git_invocation(&self, args: &[&str]) -> Invocation {
        Invocation::new("git")
            .arg("-C")
            .arg(self.local_dir.to_string_lossy())
            .args(args.iter().copied())
    }

    fn execute(&self, invocation: &Invocation) -> Result<()> {
        self.runner.run(invocation)?.check(invocation)
    }
}
