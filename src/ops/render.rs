//! Implementation of `tskit-build flags` and `tskit-build compile-commands`.

use std::path::Path;

use anyhow::Result;

use crate::builder::compile_commands::{compile_commands, emit_compile_commands};
use crate::builder::flags::FlagRenderer;
use crate::builder::toolchain::{detect_toolchain, Toolchain, ToolchainFamily};
use crate::core::descriptor::ExtensionDescriptor;
use crate::util::GlobalContext;

/// Options for rendering toolchain flags.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Toolchain family override
    pub toolchain: Option<ToolchainFamily>,
}

/// Compile and link flags for one toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFlags {
    pub toolchain: ToolchainFamily,
    pub compile: Vec<String>,
    pub link: Vec<String>,
}

/// Detect the toolchain, letting `opts` override the configured family.
pub fn toolchain_for(ctx: &GlobalContext, opts: &RenderOptions) -> Result<Box<dyn Toolchain>> {
    let mut compiler = ctx.config().compiler.clone();
    if let Some(family) = opts.toolchain {
        compiler.family = Some(family.to_string());
    }
    detect_toolchain(&compiler)
}

/// Render the descriptor's flags for the selected toolchain.
pub fn render_flags(
    ctx: &GlobalContext,
    descriptor: &ExtensionDescriptor,
    opts: &RenderOptions,
) -> Result<RenderedFlags> {
    let toolchain = toolchain_for(ctx, opts)?;
    let renderer = FlagRenderer::new(
        toolchain.as_ref(),
        descriptor,
        ctx.config().compiler.allows_std_fallback(),
    )?;

    Ok(RenderedFlags {
        toolchain: toolchain.family(),
        compile: renderer.compile_flags(),
        link: renderer.link_flags(),
    })
}

/// Write compile_commands.json for the descriptor to `output`.
pub fn write_compile_commands(
    ctx: &GlobalContext,
    descriptor: &ExtensionDescriptor,
    opts: &RenderOptions,
    output: &Path,
) -> Result<usize> {
    let toolchain = toolchain_for(ctx, opts)?;
    let renderer = FlagRenderer::new(
        toolchain.as_ref(),
        descriptor,
        ctx.config().compiler.allows_std_fallback(),
    )?;

    let commands = compile_commands(&renderer, ctx.root());
    emit_compile_commands(&commands, output)?;
    Ok(commands.len())
}
