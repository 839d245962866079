//! # Rebuild Command Implementation
//!
//! Scans the root for repositories and overwrites the index with exactly
//! what was found. Entries for repositories that no longer exist disappear;
//! repositories cloned by other means are picked up.

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use repohome::output::{emoji, OutputConfig};
use repohome::repository::RepositoryManager;
use repohome::suggestions;

use super::Context;

/// Execute the `rebuild` command.
pub fn execute(ctx: &Context) -> Result<()> {
    let manager = RepositoryManager::new(&ctx.settings, &ctx.index, &ctx.runner);
    let spinner = create_spinner(&ctx.out, "Scanning");

    let result = manager.rebuild(|dir| {
        if let Ok(relative) = dir.strip_prefix(ctx.root()) {
            spinner.set_message(format!("Scanning {}", relative.display()));
        }
    });
    spinner.finish_and_clear();
    let found = result.map_err(suggestions::explain)?;

    ctx.out.status(format_args!(
        "{} Indexed {} repositories under {}",
        emoji(&ctx.out, "🔄", "[INDEX]"),
        found.len(),
        ctx.root().display()
    ));
    Ok(())
}

/// Spinner on stderr, hidden when quiet or when stderr is not a terminal.
fn create_spinner(out: &OutputConfig, message: &str) -> ProgressBar {
    if out.quiet {
        return ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈", ""])
        .template("{spinner:.green} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
