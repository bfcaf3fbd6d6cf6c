//! Compiler flag rendering.
//!
//! This module turns the toolchain-neutral extension descriptor into
//! command lines and compile databases for a concrete C toolchain.

pub mod compile_commands;
pub mod flags;
pub mod toolchain;

pub use compile_commands::{compile_commands, emit_compile_commands, CompileCommand};
pub use flags::FlagRenderer;
pub use toolchain::{
    detect_toolchain, CommandSpec, CompileInput, GccToolchain, MsvcToolchain, Toolchain,
    ToolchainFamily,
};
