//! `tskit-build version` command

use anyhow::Result;

use tskit_build::resolve_version;

use super::context;
use crate::cli::GlobalArgs;

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = context(global)?;
    let version = resolve_version(&ctx.version_path())?;

    println!("{}", version);
    Ok(())
}
