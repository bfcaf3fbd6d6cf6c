//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use tskit_build::builder::ToolchainFamily;

/// tskit-build - build configuration for the tskit Python extension
#[derive(Parser)]
#[command(name = "tskit-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project root (defaults to searching upward for `_tskitmodule.c`)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Python interpreter used to locate numpy
    #[arg(long, global = true, value_name = "PATH", env = "TSKIT_BUILD_PYTHON")]
    pub python: Option<PathBuf>,

    /// numpy include directory (skips running Python)
    #[arg(long, global = true, value_name = "DIR")]
    pub numpy_include: Option<PathBuf>,

    /// Host system identifier, as reported by `platform.system()`
    #[arg(long, global = true, value_name = "ID")]
    pub system: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the extension plan as JSON
    Describe,

    /// Print the package version
    Version,

    /// Show compile/link flags for the extension
    Flags(FlagsArgs),

    /// Write compile_commands.json for the extension sources
    CompileCommands(CompileCommandsArgs),
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Show compile flags only
    #[arg(long, conflicts_with = "link")]
    pub compile: bool,

    /// Show link flags only
    #[arg(long)]
    pub link: bool,

    /// Toolchain family to render for (gcc, clang, apple-clang, msvc)
    #[arg(long, value_name = "FAMILY")]
    pub toolchain: Option<ToolchainFamily>,
}

#[derive(Args)]
pub struct CompileCommandsArgs {
    /// Output path (defaults to `<root>/compile_commands.json`)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Toolchain family to render for (gcc, clang, apple-clang, msvc)
    #[arg(long, value_name = "FAMILY")]
    pub toolchain: Option<ToolchainFamily>,
}

/// Options every command passes down to the library.
pub struct GlobalArgs {
    pub root: Option<PathBuf>,
    pub python: Option<PathBuf>,
    pub numpy_include: Option<PathBuf>,
    pub system: Option<String>,
}
