//! `tskit-build flags` command

use anyhow::Result;

use tskit_build::ops::{extension_descriptor, render_flags, RenderOptions};

use super::{context, describe_options};
use crate::cli::{FlagsArgs, GlobalArgs};

pub fn execute(global: &GlobalArgs, args: FlagsArgs) -> Result<()> {
    let ctx = context(global)?;
    let descriptor = extension_descriptor(&ctx, &describe_options(global))?;

    let opts = RenderOptions {
        toolchain: args.toolchain,
    };
    let flags = render_flags(&ctx, &descriptor, &opts)?;

    if !args.link {
        println!("# Compile flags for `{}` ({}):", descriptor.name(), flags.toolchain);
        for flag in &flags.compile {
            println!("  {}", flag);
        }
    }

    if !args.compile && !args.link {
        println!();
    }

    if !args.compile {
        println!("# Link flags for `{}` ({}):", descriptor.name(), flags.toolchain);
        if flags.link.is_empty() {
            println!("  (none)");
        }
        for flag in &flags.link {
            println!("  {}", flag);
        }
    }

    Ok(())
}
