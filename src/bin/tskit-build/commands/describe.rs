//! `tskit-build describe` command

use anyhow::Result;

use tskit_build::ops::describe;

use super::{context, describe_options};
use crate::cli::GlobalArgs;

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = context(global)?;
    let plan = describe(&ctx, &describe_options(global))?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
