//! # repohome Library
//!
//! This library keeps local clones of git repositories in one predictable
//! layout below a root directory and remembers where they are. It is used by
//! the `repohome` command-line tool but works on its own as well.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::{Path, PathBuf};
//! use repohome::path::map_url;
//!
//! let https = map_url("https://example.com/a/b.git", Path::new("/r")).unwrap();
//! let scp = map_url("git@example.com:a/b.git", Path::new("/r")).unwrap();
//!
//! assert_eq!(https, PathBuf::from("/r/example.com/a/b"));
//! assert_eq!(https, scp);
//! ```
//!
//! ## Core Concepts
//!
//! - **Path mapping (`path`)**: turns a remote URL into `root/host/path`.
//! - **Index (`index`)**: a JSON list of known repository paths, kept sorted
//!   and free of duplicates.
//! - **Scanning (`scanner`)**: finds repositories on disk, used to rebuild
//!   the index.
//! - **Commands (`runner`, `git`, `hooks`, `batch`)**: everything external
//!   is spawned through the `CommandRunner` trait, one repository at a time.
//! - **Operations (`repository`, `remove`, `vscode`)**: clone, update,
//!   switch, remove and editor export built on the pieces above.
//! - **Settings (`config`)**: root and hooks from the global git config.

pub mod batch;
pub mod config;
pub mod defaults;
pub mod error;
pub mod filesystem;
pub mod git;
pub mod hooks;
pub mod index;
pub mod output;
pub mod path;
pub mod remove;
pub mod repository;
pub mod runner;
pub mod scanner;
pub mod suggestions;
pub mod vscode;

#[cfg(test)]
mod path_proptest;
