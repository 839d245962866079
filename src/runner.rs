//! Execution of external commands.
//!
//! Everything repohome spawns (git, user commands in `each`, hooks) goes
//! through [`CommandRunner`], so tests can swap the real process spawner for
//! a recorder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::defaults::{REPO_ENV, REPO_PLACEHOLDER, ROOT_ENV, ROOT_PLACEHOLDER};
use crate::error::{Error, Result};

/// A fully described process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
        }
    }

    /// Build an invocation from an argv list; `None` if `argv` is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone()).args(args.iter().cloned()))
    }

    /// Run `command` through the platform shell.
    pub fn shell(command: &str) -> Self {
        if cfg!(windows) {
            Self::new("cmd").args(["/C", command])
        } else {
            Self::new("sh").args(["-c", command])
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Export the root and repository locations to the child environment.
    pub fn repo_env(self, root: &Path, repo: &Path) -> Self {
        self.env(ROOT_ENV, root.to_string_lossy())
            .env(REPO_ENV, repo.to_string_lossy())
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command.envs(&self.env);
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Exit status of a finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutcome {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn failure(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into an [`Error::Command`].
    pub fn check(self, invocation: &Invocation) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(Error::Command {
                command: invocation.to_string(),
                message: self.describe(),
            })
        }
    }

    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Output of a process run with captured streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub outcome: CommandOutcome,
    pub stdout: String,
    pub stderr: String,
}

/// Spawns processes.
pub trait CommandRunner {
    /// Run with inherited stdin/stdout/stderr and wait for completion.
    fn run(&self, invocation: &Invocation) -> Result<CommandOutcome>;

    /// Run with stdout and stderr captured.
    fn capture(&self, invocation: &Invocation) -> Result<CapturedOutput>;
}

/// Runs real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutcome> {
        log::debug!("running {}", invocation);
        let status = invocation
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| spawn_error(invocation, e))?;
        Ok(CommandOutcome {
            code: status.code(),
        })
    }

    fn capture(&self, invocation: &Invocation) -> Result<CapturedOutput> {
        log::debug!("capturing {}", invocation);
        let output = invocation
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(invocation, e))?;
        Ok(CapturedOutput {
            outcome: CommandOutcome {
                code: output.status.code(),
            },
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn spawn_error(invocation: &Invocation, error: std::io::Error) -> Error {
    Error::Command {
        command: invocation.to_string(),
        message: format!("failed to start: {}", error),
    }
}

/// Replace the root placeholder in every argument.
pub fn substitute_root(argv: &[String], root: &Path) -> Vec<String> {
    let root = root.to_string_lossy();
    argv.iter()
        .map(|arg| arg.replace(ROOT_PLACEHOLDER, &root))
        .collect()
}

/// Replace the repository placeholder in every argument.
pub fn substitute_repo(argv: &[String], repo: &Path) -> Vec<String> {
    let repo = repo.to_string_lossy();
    argv.iter()
        .map(|arg| arg.replace(REPO_PLACEHOLDER, &repo))
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    //! Test double that records invocations instead of spawning them.

    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Default)]
    pub struct RecordingRunner {
        pub calls: RefCell<Vec<Invocation>>,
        outcomes: RefCell<VecDeque<CommandOutcome>>,
        captures: RefCell<VecDeque<CapturedOutput>>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the exit status for the next `run` call (default: success).
        pub fn push_outcome(&self, outcome: CommandOutcome) {
            self.outcomes.borrow_mut().push_back(outcome);
        }

        /// Queue the output for the next `capture` call (default: empty success).
        pub fn push_capture(&self, stdout: &str, outcome: CommandOutcome) {
            self.captures.borrow_mut().push_back(CapturedOutput {
                outcome,
                stdout: stdout.to_string(),
                stderr: String::new(),
            });
        }

        /// Recorded argv lists, program first.
        pub fn argvs(&self) -> Vec<Vec<String>> {
            self.calls
                .borrow()
                .iter()
                .map(|call| {
                    std::iter::once(call.program.clone())
                        .chain(call.args.iter().cloned())
                        .collect()
                })
                .collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, invocation: &Invocation) -> Result<CommandOutcome> {
            self.calls.borrow_mut().push(invocation.clone());
            Ok(self
                .outcomes
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(CommandOutcome::success))
        }

        fn capture(&self, invocation: &Invocation) -> Result<CapturedOutput> {
            self.calls.borrow_mut().push(invocation.clone());
            Ok(self
                .captures
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| CapturedOutput {
                    outcome: CommandOutcome::success(),
                    stdout: String::new(),
                    stderr: String::new(),
                }))
        }
    }
}
