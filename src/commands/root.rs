//! # Root Command Implementation

use anyhow::Result;

use super::Context;

/// Execute the `root` command: print the resolved root directory.
///
/// The directory does not have to exist yet.
pub fn execute(ctx: &Context) -> Result<()> {
    println!("{}", ctx.root().display());
    Ok(())
}
