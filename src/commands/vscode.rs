//! # VS Code Command Implementation
//!
//! Adds indexed repositories to the saved projects of the VS Code "Project
//! Manager" extension. Entries already pointing at an exported repository are
//! replaced; all other saved projects are kept.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use repohome::output::emoji;
use repohome::vscode;

use super::Context;

/// Export repositories to the VS Code Project Manager extension
#[derive(Args, Debug)]
pub struct VscodeArgs {
    /// Repositories to export. Defaults to every indexed repository.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Execute the `vscode` command.
pub fn execute(args: VscodeArgs, ctx: &Context) -> Result<()> {
    let repositories = ctx.targets(&args.paths)?;

    let summary = vscode::export(&ctx.projects_file, ctx.root(), &repositories)
        .with_context(|| format!("Failed to export to {}", ctx.projects_file.display()))?;

    ctx.out.status(format_args!(
        "{} Exported {} repositories to {} ({} replaced, {} kept)",
        emoji(&ctx.out, "📝", "[EXPORT]"),
        summary.exported,
        ctx.projects_file.display(),
        summary.replaced,
        summary.kept
    ));
    Ok(())
}
