//! # Switch Command Implementation
//!
//! Checks out a branch or tag in one or more repositories and brings it up to
//! date. Branches are fetched, switched to and fast-forwarded. Tags are
//! checked out detached; a tag already present locally is used without
//! fetching.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use repohome::repository::RepositoryManager;
use repohome::suggestions;

use super::{print_report, Context};

/// Switch repositories to a branch or tag and update them
#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// Branch or tag name.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Treat NAME as a tag and detach HEAD at it.
    #[arg(long)]
    pub tag: bool,

    /// Repository to switch; may be repeated. Defaults to every indexed repository.
    #[arg(long = "repo", value_name = "PATH")]
    pub repos: Vec<PathBuf>,
}

/// Execute the `switch` command.
pub fn execute(args: SwitchArgs, ctx: &Context) -> Result<()> {
    let repositories = ctx.targets(&args.repos)?;
    let manager = RepositoryManager::new(&ctx.settings, &ctx.index, &ctx.runner);

    let report = manager
        .switch_all(&repositories, &args.name, args.tag)
        .map_err(suggestions::explain)?;

    print_report(&ctx.out, "Switched", &report);
    Ok(())
}
