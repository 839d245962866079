//! # Clone Command Implementation
//!
//! Clones each URL to `root/host/path` and registers it in the index.
//! URLs that cannot be parsed or fail to clone are reported and skipped; the
//! remaining URLs are still processed.

use anyhow::Result;
use clap::Args;

use repohome::output::emoji;
use repohome::repository::{CloneOutcome, RepositoryManager};
use repohome::suggestions;

use super::{print_report, Context};

/// Clone repositories into their place below the root
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Repository URLs (https://host/path, ssh://user@host/path or user@host:path)
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Do not clone submodules.
    #[arg(long)]
    pub no_submodules: bool,
}

/// Execute the `clone` command.
pub fn execute(args: CloneArgs, ctx: &Context) -> Result<()> {
    let manager = RepositoryManager::new(&ctx.settings, &ctx.index, &ctx.runner);
    let out = &ctx.out;

    let report = manager
        .clone_all(&args.urls, !args.no_submodules, |url, outcome| {
            let (marker, relation) = match outcome {
                CloneOutcome::Cloned(_) => (emoji(out, "📥", "[CLONE]"), "->"),
                CloneOutcome::AlreadyPresent(_) => (emoji(out, "📌", "[SKIP]"), "already at"),
            };
            out.status(format_args!(
                "{} {} {} {}",
                marker,
                url,
                relation,
                outcome.path().display()
            ))
        })
        .map_err(suggestions::explain)?;

    print_report(out, "Cloned", &report);
    Ok(())
}
