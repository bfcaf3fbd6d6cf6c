//! Command implementations

pub mod compile_commands;
pub mod describe;
pub mod flags;
pub mod version;

use anyhow::{Context, Result};

use tskit_build::core::HostSystem;
use tskit_build::ops::DescribeOptions;
use tskit_build::util::GlobalContext;

use crate::cli::GlobalArgs;

/// Build the global context from `--root` or the working directory.
pub fn context(global: &GlobalArgs) -> Result<GlobalContext> {
    match global.root {
        Some(ref root) => {
            let root = root
                .canonicalize()
                .with_context(|| format!("project root `{}` does not exist", root.display()))?;
            Ok(GlobalContext::with_root(root))
        }
        None => GlobalContext::new(),
    }
}

/// Descriptor overrides from the command line.
pub fn describe_options(global: &GlobalArgs) -> DescribeOptions {
    DescribeOptions {
        system: global.system.as_deref().map(HostSystem::new),
        python: global.python.clone(),
        numpy_include: global.numpy_include.clone(),
    }
}
