//! High-level operations.
//!
//! This module contains the implementation of tskit-build commands.

pub mod describe;
pub mod render;

pub use describe::{describe, extension_builder, extension_descriptor, DescribeOptions, ExtensionPlan};
pub use render::{render_flags, toolchain_for, write_compile_commands, RenderOptions, RenderedFlags};
