//! Best-effort execution over many repositories.
//!
//! Items are processed one after another in input order. A per-item failure
//! is recorded and the batch moves on; only errors for which
//! [`Error::is_fatal`] holds stop the whole batch.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::runner::{substitute_repo, substitute_root, CommandRunner, Invocation};

/// Result of one batch item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    /// What the item acted on (a repository path or a URL).
    pub target: String,
    /// Failure description, `None` on success.
    pub error: Option<String>,
}

impl ItemResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub items: Vec<ItemResult>,
}

impl BatchReport {
    pub fn record_success(&mut self, target: impl Into<String>) {
        self.items.push(ItemResult {
            target: target.into(),
            error: None,
        });
    }

    pub fn record_failure(&mut self, target: impl Into<String>, error: impl ToString) {
        self.items.push(ItemResult {
            target: target.into(),
            error: Some(error.to_string()),
        });
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemResult> {
        self.items.iter().filter(|item| !item.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

/// Apply `action` to every item, recording non-fatal failures.
///
/// `label` turns an item into the target string used in the report.
pub fn run_batch<T, L, F>(items: &[T], label: L, mut action: F) -> Result<BatchReport>
where
    L: Fn(&T) -> String,
    F: FnMut(&T) -> Result<()>,
{
    let mut report = BatchReport::default();
    for item in items {
        let target = label(item);
        match action(item) {
            Ok(()) => report.record_success(target),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::warn!("{}: {}", target, e);
                report.record_failure(target, e);
            }
        }
    }
    Ok(report)
}

/// Run `argv` once in every repository.
///
/// `{root}` is replaced once for the whole argument list and `{repo}` for each
/// repository. The command runs with the repository as working directory and
/// `REPOHOME_ROOT` / `REPOHOME_REPO` in its environment. A command that exits
/// non-zero is recorded as a failure.
pub fn run_in_each<R: CommandRunner + ?Sized>(
    runner: &R,
    root: &Path,
    repositories: &[PathBuf],
    argv: &[String],
) -> Result<BatchReport> {
    if argv.is_empty() {
        return Err(Error::Command {
            command: String::new(),
            message: "no command given".to_string(),
        });
    }
    let rooted = substitute_root(argv, root);

    run_batch(
        repositories,
        |repo| repo.display().to_string(),
        |repo| {
            let argv = substitute_repo(&rooted, repo);
            let Some(invocation) = Invocation::from_argv(&argv) else {
                return Ok(());
            };
            let invocation = invocation.cwd(repo).repo_env(root, repo);
            runner.run(&invocation)?.check(&invocation)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::RecordingRunner;
    use crate::runner::CommandOutcome;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_report_counts() {
        let mut report = BatchReport::default();
        report.record_success("/r/a");
        report.record_failure("/r/b", "exit status 1");
        report.record_success("/r/c");

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_succeeded());
        assert_eq!(report.failures().next().unwrap().target, "/r/b");
    }

    #[test]
    fn test_run_batch_continues_after_failure() {
        let items = ["a", "bad", "c"];
        let mut seen = Vec::new();

        let report = run_batch(
            &items,
            |item| item.to_string(),
            |item| {
                seen.push(*item);
                if *item == "bad" {
                    Err(Error::UrlParse {
                        url: item.to_string(),
                        hint: None,
                    })
                } else {
                    Ok(())
                }
            },
        )
        .unwrap();

        assert_eq!(seen, vec!["a", "bad", "c"]);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_run_batch_stops_on_fatal_error() {
        let items = ["a", "b"];
        let mut seen = Vec::new();

        let result = run_batch(
            &items,
            |item| item.to_string(),
            |item| {
                seen.push(*item);
                Err(Error::index("/state/repositories.json", "disk full"))
            },
        );

        assert!(matches!(result, Err(Error::Index { .. })));
        assert_eq!(seen, vec!["a"]);
    }

    #[test]
    fn test_run_in_each_substitutes_and_sets_context() {
        let runner = RecordingRunner::new();
        let repos = vec![PathBuf::from("/r/h/a"), PathBuf::from("/r/h/b")];

        let report = run_in_each(
            &runner,
            Path::new("/r"),
            &repos,
            &argv(&["echo", "{root}", "{repo}"]),
        )
        .unwrap();

        assert!(report.all_succeeded());
        assert_eq!(
            runner.argvs(),
            vec![
                argv(&["echo", "/r", "/r/h/a"]),
                argv(&["echo", "/r", "/r/h/b"]),
            ]
        );
        let calls = runner.calls.borrow();
        assert_eq!(calls[1].cwd.as_deref(), Some(Path::new("/r/h/b")));
        assert_eq!(calls[1].env.get("REPOHOME_REPO").unwrap(), "/r/h/b");
    }

    #[test]
    fn test_run_in_each_records_non_zero_exit_and_continues() {
        let runner = RecordingRunner::new();
        runner.push_outcome(CommandOutcome::failure(1));
        let repos = vec![PathBuf::from("/r/a"), PathBuf::from("/r/b")];

        let report = run_in_each(&runner, Path::new("/r"), &repos, &argv(&["false"])).unwrap();

        assert_eq!(runner.calls.borrow().len(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures().next().unwrap().target, "/r/a");
    }

    #[test]
    fn test_run_in_each_rejects_empty_command() {
        let runner = RecordingRunner::new();
        let repos = vec![PathBuf::from("/r/a")];
        assert!(run_in_each(&runner, Path::new("/r"), &repos, &[]).is_err());
    }
}
