//! User hooks around clone and remove.
//!
//! A hook is a shell command from the settings. It gets the root and the
//! repository in `REPOHOME_ROOT` / `REPOHOME_REPO`. Hooks never block the
//! operation they wrap: a failing or missing hook is logged and ignored.

use std::path::Path;

use crate::config::{Hooks, Operation, Stage};
use crate::runner::{CommandRunner, Invocation};

/// Where and for which repository a hook runs.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub root: &'a Path,
    pub repo: &'a Path,
    pub cwd: &'a Path,
}

/// Run the hook for `operation` at `stage`, if one is configured.
///
/// Returns `true` when no hook is configured or the hook succeeded.
pub fn run_hook<R: CommandRunner + ?Sized>(
    runner: &R,
    hooks: &Hooks,
    operation: Operation,
    stage: Stage,
    context: HookContext<'_>,
) -> bool {
    let Some(command) = hooks.for_operation(operation).get(stage) else {
        return true;
    };

    let invocation = Invocation::shell(command)
        .cwd(context.cwd)
        .repo_env(context.root, context.repo);
    log::debug!(
        "running {}.{} hook in {}",
        operation,
        stage.name(),
        context.cwd.display()
    );

    match runner.run(&invocation) {
        Ok(outcome) if outcome.is_success() => true,
        Ok(outcome) => {
            log::warn!(
                "{} {} hook `{}` failed: {}",
                operation,
                stage.name(),
                command,
                outcome.describe()
            );
            false
        }
        Err(e) => {
            log::warn!("{} {} hook `{}` failed: {}", operation, stage.name(), command, e);
            false
        }
    }
}
