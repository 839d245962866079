//! # Each Command Implementation
//!
//! Runs a command in every indexed repository, in index order.
//!
//! ## Placeholders
//!
//! - `{root}` is replaced with the root directory.
//! - `{repo}` is replaced with the repository the command runs in.
//!
//! The command also sees `REPOHOME_ROOT` and `REPOHOME_REPO` in its
//! environment and runs with the repository as working directory. A command
//! that fails in one repository does not stop the others, and does not change
//! the exit status of `repohome` itself.

use anyhow::Result;
use clap::Args;

use repohome::batch::run_in_each;
use repohome::suggestions;

use super::{print_report, Context};

/// Run a command in every indexed repository
#[derive(Args, Debug)]
pub struct EachArgs {
    /// Command and arguments, e.g. `git status -s`
    #[arg(
        required = true,
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Execute the `each` command.
pub fn execute(args: EachArgs, ctx: &Context) -> Result<()> {
    let repositories = ctx.index.list_existing().map_err(suggestions::explain)?;
    if repositories.is_empty() {
        ctx.out.status(format_args!("No repositories in the index"));
        return Ok(());
    }

    let report = run_in_each(&ctx.runner, ctx.root(), &repositories, &args.command)
        .map_err(suggestions::explain)?;

    print_report(&ctx.out, "Ran in", &report);
    Ok(())
}
