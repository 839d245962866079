//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `repohome` command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the shared
//!   [`Context`] and performs the command's logic.

use std::path::{Path, PathBuf};

use anyhow::Result;

use repohome::batch::BatchReport;
use repohome::config::Settings;
use repohome::filesystem::lexical_absolute;
use repohome::index::RepositoryIndex;
use repohome::output::{emoji, OutputConfig};
use repohome::runner::SystemRunner;
use repohome::suggestions;

pub mod clone;
pub mod each;
pub mod list;
pub mod rebuild;
pub mod remove;
pub mod root;
pub mod switch;
pub mod update;
pub mod vscode;

/// Everything a command needs, resolved once in `cli`.
pub struct Context {
    pub out: OutputConfig,
    pub settings: Settings,
    pub index: RepositoryIndex,
    pub runner: SystemRunner,
    pub projects_file: PathBuf,
}

impl Context {
    pub fn root(&self) -> &Path {
        &self.settings.root
    }

    /// The given paths made absolute, or every existing indexed repository.
    pub fn targets(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        if paths.is_empty() {
            return self.index.list_existing().map_err(suggestions::explain);
        }
        Ok(paths
            .iter()
            .map(|path| lexical_absolute(path))
            .collect::<std::io::Result<Vec<_>>>()?)
    }
}

/// Print failures of a batch to stderr and a one-line summary.
pub fn print_report(out: &OutputConfig, verb: &str, report: &BatchReport) {
    for failure in report.failures() {
        eprintln!(
            "{} {}: {}",
            out.red(emoji(out, "❌", "[FAIL]")),
            failure.target,
            failure.error.as_deref().unwrap_or_default()
        );
    }

    if report.all_succeeded() {
        out.status(format_args!(
            "{} {} {} of {}",
            out.green(emoji(out, "✅", "[OK]")),
            verb,
            report.succeeded(),
            report.total()
        ));
    } else {
        // shown even when quiet
        eprintln!(
            "{} {} {} of {}, {} failed",
            out.red(emoji(out, "⚠️", "[WARN]")),
            verb,
            report.succeeded(),
            report.total(),
            report.failed()
        );
    }
}
