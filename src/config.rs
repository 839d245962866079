//! # Settings
//!
//! repohome keeps its settings in the user's global git configuration, under
//! the `repohome` section:
//!
//! ```text
//! [repohome]
//!     root = ~/src
//! [repohome "clone"]
//!     post = direnv allow
//! [repohome "remove"]
//!     pre = git stash list
//! ```
//!
//! The root can be overridden from the command line or the `REPOHOME_ROOT`
//! environment variable (both handled by the CLI, which passes the value in
//! as an override).

use std::fmt;
use std::path::{Path, PathBuf};

use crate::defaults::{self, CONFIG_SECTION};
use crate::error::Result;
use crate::filesystem::lexical_absolute;
use crate::runner::{CommandRunner, Invocation};

/// Source of raw configuration values.
pub trait ConfigSource {
    /// Look up `key`, returning `None` when it is not set.
    fn get(&self, key: &str) -> Result<Option<String>>;
}

/// Reads values with `git config --global --get`.
pub struct GitConfigSource<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> GitConfigSource<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner + ?Sized> ConfigSource for GitConfigSource<'_, R> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let invocation = Invocation::new("git").args(["config", "--global", "--get", key]);
        let output = match self.runner.capture(&invocation) {
            Ok(output) => output,
            Err(e) => {
                // without a git binary there is no git configuration either
                log::debug!("cannot read {}: {}", key, e);
                return Ok(None);
            }
        };
        // exit status 1 means the key is not set
        if output.outcome.code == Some(1) {
            log::debug!("config {} is not set", key);
            return Ok(None);
        }
        output.outcome.check(&invocation)?;

        let value = output.stdout.trim();
        log::debug!("config {} = {:?}", key, value);
        Ok((!value.is_empty()).then(|| value.to_string()))
    }
}

/// Operations that support hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Clone,
    Remove,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Clone, Operation::Remove];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Clone => "clone",
            Operation::Remove => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// When a hook runs relative to its operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Pre,
    Post,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Pre => "pre",
            Stage::Post => "post",
        }
    }
}

/// Shell commands configured for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookCommands {
    pub pre: Option<String>,
    pub post: Option<String>,
}

impl HookCommands {
    pub fn get(&self, stage: Stage) -> Option<&str> {
        match stage {
            Stage::Pre => self.pre.as_deref(),
            Stage::Post => self.post.as_deref(),
        }
    }
}

/// Hooks for every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hooks {
    pub clone: HookCommands,
    pub remove: HookCommands,
}

impl Hooks {
    pub fn for_operation(&self, operation: Operation) -> &HookCommands {
        match operation {
            Operation::Clone => &self.clone,
            Operation::Remove => &self.remove,
        }
    }

    fn for_operation_mut(&mut self, operation: Operation) -> &mut HookCommands {
        match operation {
            Operation::Clone => &mut self.clone,
            Operation::Remove => &mut self.remove,
        }
    }
}

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Absolute root directory under which repositories live.
    pub root: PathBuf,
    pub hooks: Hooks,
}

impl Settings {
    /// Resolve settings from `source`.
    ///
    /// `root_override` (from `--root` or `REPOHOME_ROOT`) wins over the
    /// configured `repohome.root`, which wins over `~/repos`.
    pub fn resolve(source: &dyn ConfigSource, root_override: Option<&Path>) -> Result<Self> {
        let root = match root_override {
            Some(path) => path.to_path_buf(),
            None => match source.get(&root_key())? {
                Some(value) => PathBuf::from(value),
                None => defaults::default_root(),
            },
        };
        let root = lexical_absolute(&expand_tilde(&root))?;

        let mut hooks = Hooks::default();
        for operation in Operation::ALL {
            let commands = hooks.for_operation_mut(operation);
            commands.pre = source.get(&hook_key(operation, Stage::Pre))?;
            commands.post = source.get(&hook_key(operation, Stage::Post))?;
        }

        Ok(Self { root, hooks })
    }
}

/// Configuration key of the root directory.
pub fn root_key() -> String {
    format!("{}.root", CONFIG_SECTION)
}

/// Configuration key of a hook, e.g. `repohome.clone.pre`.
pub fn hook_key(operation: Operation, stage: Stage) -> String {
    format!("{}.{}.{}", CONFIG_SECTION, operation.name(), stage.name())
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
