//! # Remove Command Implementation
//!
//! Deletes a repository below the root, prunes directories left empty and
//! drops the path from the index.
//!
//! ## Confirmation
//!
//! Unless `--yes` is given the user is asked once. Only `y` and `n` are
//! accepted; `n` keeps the repository and exits successfully, any other
//! answer is an error. On a terminal the prompt uses `dialoguer`; otherwise
//! one line is read from stdin so the answer can be piped in.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

use repohome::error::Error;
use repohome::output::emoji;
use repohome::remove::{Confirmation, RemoveOutcome, Remover};
use repohome::suggestions;

use super::Context;

/// Delete a repository below the root and forget it
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Repository directory to remove.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Remove without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the `remove` command.
pub fn execute(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let remover = Remover::new(&ctx.settings, &ctx.index, &ctx.runner);

    let result = remover.remove(&args.path, |path| {
        if args.yes {
            Ok(Confirmation::Yes)
        } else {
            ask(path, ctx.out.use_color).map(|answer| Confirmation::parse(&answer))
        }
    });

    match result {
        Ok(RemoveOutcome::Removed { path, cleaned }) => {
            for dir in &cleaned {
                log::info!("removed empty directory {}", dir.display());
            }
            ctx.out.status(format_args!(
                "{} Removed {}",
                emoji(&ctx.out, "🗑️", "[DEL]"),
                path.display()
            ));
            Ok(())
        }
        Ok(RemoveOutcome::Aborted { path }) => {
            ctx.out.status(format_args!("Kept {}", path.display()));
            Ok(())
        }
        Err(Error::Validation { path, .. }) if !path.exists() => {
            let known = ctx.index.load().unwrap_or_default();
            Err(suggestions::repository_not_found(&path, &known))
        }
        Err(e) => Err(suggestions::explain(e)),
    }
}

fn ask(path: &Path, use_color: bool) -> repohome::error::Result<String> {
    let prompt = format!("Remove {} and everything in it? [y/n]", path.display());

    if io::stdin().is_terminal() {
        let theme = ColorfulTheme::default();
        let input = if use_color {
            Input::<String>::with_theme(&theme)
        } else {
            Input::<String>::new()
        };
        return input
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::Io(io::Error::other(e)));
    }

    eprint!("{} ", prompt);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer)
}
