//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use repohome::config::{GitConfigSource, Settings};
use repohome::defaults;
use repohome::index::RepositoryIndex;
use repohome::output::OutputConfig;
use repohome::runner::SystemRunner;
use repohome::suggestions;

use crate::commands::{self, Context};

/// repohome - Keep git clones organized under one root
#[derive(Parser, Debug)]
#[command(name = "repohome")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress and informational output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Root directory for repositories.
    ///
    /// Defaults to `repohome.root` from the global git config, then `~/repos`.
    #[arg(long, global = true, value_name = "DIR", env = "REPOHOME_ROOT")]
    root: Option<PathBuf>,

    /// Location of the repository index file.
    #[arg(long, global = true, value_name = "FILE", env = "REPOHOME_INDEX")]
    index: Option<PathBuf>,

    /// Location of the VS Code Project Manager `projects.json`.
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "REPOHOME_VSCODE_PROJECTS"
    )]
    projects_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone repositories into their place below the root
    Clone(commands::clone::CloneArgs),

    /// List indexed repositories that still exist
    List(commands::list::ListArgs),

    /// Print the root directory
    Root,

    /// Run a command in every indexed repository
    Each(commands::each::EachArgs),

    /// Delete a repository below the root and forget it
    Remove(commands::remove::RemoveArgs),

    /// Rescan the root and rewrite the index
    Rebuild,

    /// Export repositories to the VS Code Project Manager extension
    Vscode(commands::vscode::VscodeArgs),

    /// Fetch and fast-forward repositories
    Update(commands::update::UpdateArgs),

    /// Switch repositories to a branch or tag and update them
    Switch(commands::switch::SwitchArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level, self.quiet);

        let out = OutputConfig::from_env_and_flag(&self.color, self.quiet);
        let runner = SystemRunner;
        let settings = Settings::resolve(&GitConfigSource::new(&runner), self.root.as_deref())
            .map_err(suggestions::explain)?;
        log::debug!("root directory: {}", settings.root.display());

        let index = RepositoryIndex::new(self.index.unwrap_or_else(defaults::default_index_path));
        let ctx = Context {
            out,
            settings,
            index,
            runner,
            projects_file: self
                .projects_file
                .unwrap_or_else(defaults::default_vscode_projects_path),
        };

        match self.command {
            Commands::Clone(args) => commands::clone::execute(args, &ctx),
            Commands::List(args) => commands::list::execute(args, &ctx),
            Commands::Root => commands::root::execute(&ctx),
            Commands::Each(args) => commands::each::execute(args, &ctx),
            Commands::Remove(args) => commands::remove::execute(args, &ctx),
            Commands::Rebuild => commands::rebuild::execute(&ctx),
            Commands::Vscode(args) => commands::vscode::execute(args, &ctx),
            Commands::Update(args) => commands::update::execute(args, &ctx),
            Commands::Switch(args) => commands::switch::execute(args, &ctx),
        }
    }
}

/// Initialise `env_logger`; `RUST_LOG` wins over the flag when set.
fn init_logging(level: &str, quiet: bool) {
    let level = if quiet { "error" } else { level };
    let env = env_logger::Env::default().default_filter_or(level);
    // a logger may already be installed when running under tests
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
