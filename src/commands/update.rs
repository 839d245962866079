//! # Update Command Implementation
//!
//! Runs `git fetch --all --prune --tags` followed by `git merge --ff-only` in
//! each repository. A repository that cannot be fast-forwarded is reported
//! and left alone.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use repohome::repository::RepositoryManager;
use repohome::suggestions;

use super::{print_report, Context};

/// Fetch and fast-forward repositories
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Repositories to update. Defaults to every indexed repository.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let repositories = ctx.targets(&args.paths)?;
    let manager = RepositoryManager::new(&ctx.settings, &ctx.index, &ctx.runner);

    let report = manager
        .update_all(&repositories)
        .map_err(suggestions::explain)?;

    print_report(&ctx.out, "Updated", &report);
    Ok(())
}
