//! `tskit-build compile-commands` command

use anyhow::Result;

use tskit_build::builder::compile_commands::COMPILE_COMMANDS_FILE;
use tskit_build::ops::{extension_descriptor, write_compile_commands, RenderOptions};

use super::{context, describe_options};
use crate::cli::{CompileCommandsArgs, GlobalArgs};

pub fn execute(global: &GlobalArgs, args: CompileCommandsArgs) -> Result<()> {
    let ctx = context(global)?;
    let descriptor = extension_descriptor(&ctx, &describe_options(global))?;

    let output = args
        .output
        .unwrap_or_else(|| ctx.root().join(COMPILE_COMMANDS_FILE));
    let opts = RenderOptions {
        toolchain: args.toolchain,
    };
    let count = write_compile_commands(&ctx, &descriptor, &opts, &output)?;

    println!("Wrote {} compile commands to {}", count, output.display());
    Ok(())
}
