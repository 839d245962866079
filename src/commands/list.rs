//! # List Command Implementation
//!
//! Prints every indexed repository that still exists, one per line. Entries
//! whose directory is gone are skipped silently; `repohome rebuild` drops
//! them from the index.

use anyhow::Result;
use clap::Args;

use repohome::suggestions;

use super::Context;

/// List indexed repositories that still exist
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print paths relative to the root directory.
    #[arg(short, long)]
    pub relative: bool,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, ctx: &Context) -> Result<()> {
    let repositories = ctx.index.list_existing().map_err(suggestions::explain)?;

    for repo in &repositories {
        let shown = match repo.strip_prefix(ctx.root()) {
            Ok(relative) if args.relative => relative,
            _ => repo.as_path(),
        };
        println!("{}", shown.display());
    }
    Ok(())
}
