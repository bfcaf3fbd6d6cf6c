//! Toolchain abstraction for rendering compiler and linker flags.
//!
//! The descriptor is toolchain-neutral. A [`Toolchain`] turns it into the
//! concrete command lines for GCC-style drivers or MSVC.
//!
//! Toolchain detection priority:
//! 1. Compiler settings in `config.toml` (`[compiler]`)
//! 2. The `CC` environment variable
//! 3. Auto-detection (searching PATH for common compilers)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::ExtensionError;
use crate::core::language::{CStandard, Define};

mod detect;
mod gcc;
mod msvc;

pub use detect::{detect_family, detect_toolchain};
pub use gcc::GccToolchain;
pub use msvc::MsvcToolchain;

/// A command to execute, with program and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The program to run (e.g., "gcc", "cl.exe")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }
}

/// Input for a compile step.
#[derive(Debug, Clone)]
pub struct CompileInput {
    /// Source file to compile
    pub source: PathBuf,
    /// Output object file
    pub output: PathBuf,
    /// Include directories
    pub include_dirs: Vec<PathBuf>,
    /// Preprocessor defines
    pub defines: Vec<Define>,
    /// Macros to undefine
    pub undefines: Vec<String>,
    /// Language standard flag, already rendered for this toolchain
    pub std_flag: Option<String>,
    /// Additional compiler flags
    pub cflags: Vec<String>,
}

/// The family of a toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolchainFamily {
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Clang/LLVM
    Clang,
    /// Apple Clang (macOS)
    AppleClang,
    /// Microsoft Visual C++
    Msvc,
}

impl ToolchainFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolchainFamily::Gcc => "gcc",
            ToolchainFamily::Clang => "clang",
            ToolchainFamily::AppleClang => "apple-clang",
            ToolchainFamily::Msvc => "msvc",
        }
    }
}

impl FromStr for ToolchainFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcc" => Ok(ToolchainFamily::Gcc),
            "clang" => Ok(ToolchainFamily::Clang),
            "apple-clang" | "appleclang" => Ok(ToolchainFamily::AppleClang),
            "msvc" | "cl" => Ok(ToolchainFamily::Msvc),
            _ => Err(format!(
                "invalid toolchain family '{}'; expected 'gcc', 'clang', 'apple-clang', or 'msvc'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ToolchainFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for toolchain implementations.
///
/// Each toolchain knows how to spell flags for its specific compiler.
pub trait Toolchain: Send + Sync {
    /// Get the toolchain family.
    fn family(&self) -> ToolchainFamily;

    /// Get the C compiler path.
    fn compiler_path(&self) -> &Path;

    /// Standards this toolchain can select with a command-line switch.
    fn supports_std(&self, std: CStandard) -> bool;

    /// Render the switch selecting `std`.
    ///
    /// Only called with standards for which [`Toolchain::supports_std`]
    /// returns true.
    fn std_flag_value(&self, std: CStandard) -> String;

    /// Spell an include directory.
    fn include_flag(&self, dir: &Path) -> String;

    /// Spell a macro definition.
    fn define_flag(&self, define: &Define) -> String;

    /// Spell a macro removal.
    fn undefine_flag(&self, name: &str) -> String;

    /// Flags shared by every translation unit: standard, includes, defines,
    /// undefines, then extra flags.
    fn compile_flags(&self, input: &CompileInput) -> Vec<String> {
        let mut flags = Vec::new();
        flags.extend(input.std_flag.iter().cloned());
        flags.extend(input.include_dirs.iter().map(|d| self.include_flag(d)));
        flags.extend(input.defines.iter().map(|d| self.define_flag(d)));
        flags.extend(input.undefines.iter().map(|u| self.undefine_flag(u)));
        flags.extend(input.cflags.iter().cloned());
        flags
    }

    /// Generate a compile command.
    fn compile_command(&self, input: &CompileInput) -> CommandSpec;

    /// Render the flags that link `libs`.
    fn link_lib_flags(&self, libs: &[String]) -> Vec<String>;

    /// Get the object file extension.
    fn object_extension(&self) -> &str;
}

/// Resolve the language-standard switch for `requested`.
///
/// When the toolchain has no switch for `requested`, the nearest stricter
/// successor it does support is used if `allow_fallback` is set; otherwise
/// this fails with [`ExtensionError::UnsupportedStandard`].
pub fn std_flag(
    toolchain: &dyn Toolchain,
    requested: CStandard,
    allow_fallback: bool,
) -> Result<String, ExtensionError> {
    if toolchain.supports_std(requested) {
        return Ok(toolchain.std_flag_value(requested));
    }

    let unsupported = || ExtensionError::UnsupportedStandard {
        requested,
        toolchain: toolchain.family().to_string(),
    };

    if !allow_fallback {
        return Err(unsupported());
    }

    let mut candidate = requested.successor();
    while let Some(std) = candidate {
        if toolchain.supports_std(std) {
            tracing::warn!(
                "{} has no {} switch; compiling as {}",
                toolchain.family(),
                requested,
                std
            );
            return Ok(toolchain.std_flag_value(std));
        }
        candidate = std.successor();
    }

    Err(unsupported())
}
