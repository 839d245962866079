//! # repohome CLI
//!
//! Binary entry point for the `repohome` command-line tool. Arguments are
//! parsed with `clap` and dispatched to one of the `commands` modules; the
//! actual work happens in the `repohome` library.
//!
//! Exit status is non-zero only for argument errors (reported by clap) and
//! for failures that stop a command as a whole. Per-repository failures in
//! batch commands are reported but leave the status at zero.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
