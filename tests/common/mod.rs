//! Shared test utilities for E2E tests.
//!
//! Every fixture owns a temporary directory holding the root, the index, the
//! Project Manager file and a private global git config, and every command it
//! builds points `repohome` at those. Tests never read or write the real
//! user's state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_repo("example.com/a/b");
//!     fixture.command().arg("rebuild").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// A temporary home for one test run.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a fixture with an existing, empty root directory.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("root")
            .create_dir_all()
            .expect("Failed to create root");
        temp_dir
            .child("gitconfig")
            .write_str("")
            .expect("Failed to write git config");
        Self { temp_dir }
    }

    /// Create a directory that looks like a repository below the root.
    pub fn with_repo(self, relative: &str) -> Self {
        self.temp_dir
            .child("root")
            .child(relative)
            .child(".git")
            .create_dir_all()
            .expect("Failed to create repository");
        self
    }

    /// Write `repohome` settings into the fixture's global git config.
    pub fn with_git_config(self, contents: &str) -> Self {
        self.temp_dir
            .child("gitconfig")
            .write_str(contents)
            .expect("Failed to write git config");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn root(&self) -> PathBuf {
        self.path().join("root")
    }

    pub fn index_path(&self) -> PathBuf {
        self.path().join("state/repositories.json")
    }

    pub fn projects_path(&self) -> PathBuf {
        self.path().join("projects.json")
    }

    pub fn gitconfig_path(&self) -> PathBuf {
        self.path().join("gitconfig")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Entries of the index file as written by `repohome`.
    pub fn index_entries(&self) -> Vec<PathBuf> {
        let text = std::fs::read_to_string(self.index_path()).expect("Failed to read index");
        let value: serde_json::Value = serde_json::from_str(&text).expect("Index is not JSON");
        value["repositories"]
            .as_array()
            .expect("Index has no repositories array")
            .iter()
            .map(|entry| PathBuf::from(entry.as_str().expect("Entry is not a string")))
            .collect()
    }

    /// Write index entries directly.
    pub fn write_index(&self, entries: &[PathBuf]) {
        let value = serde_json::json!({ "repositories": entries });
        self.child("state/repositories.json")
            .write_str(&value.to_string())
            .expect("Failed to write index");
    }

    /// Create a command with the fixture's environment.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("repohome");
        self.apply_env_assert(&mut cmd);
        cmd
    }

    /// Like [`command`](Self::command), for the std `Command` used with a PTY.
    pub fn std_command(&self, binary: &Path) -> Command {
        let mut cmd = Command::new(binary);
        cmd.current_dir(self.path())
            .env("REPOHOME_ROOT", self.root())
            .env("REPOHOME_INDEX", self.index_path())
            .env("REPOHOME_VSCODE_PROJECTS", self.projects_path())
            .env("GIT_CONFIG_GLOBAL", self.gitconfig_path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    fn apply_env_assert(&self, cmd: &mut assert_cmd::Command) {
        cmd.current_dir(self.path())
            .env("REPOHOME_ROOT", self.root())
            .env("REPOHOME_INDEX", self.index_path())
            .env("REPOHOME_VSCODE_PROJECTS", self.projects_path())
            .env("GIT_CONFIG_GLOBAL", self.gitconfig_path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Run git in `dir` and panic on failure.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed in {}", args, dir.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_root() {
        let fixture = TestFixture::new();
        assert!(fixture.root().is_dir());
    }

    #[test]
    fn test_fixture_with_repo() {
        let fixture = TestFixture::new().with_repo("example.com/a/b");
        assert!(fixture.root().join("example.com/a/b/.git").is_dir());
    }

    #[test]
    fn test_fixture_index_round_trip() {
        let fixture = TestFixture::new();
        fixture.write_index(&[PathBuf::from("/r/a")]);
        assert_eq!(fixture.index_entries(), vec![PathBuf::from("/r/a")]);
    }
}
