//! tskit-build - build configuration for the tskit Python extension
//!
//! This crate resolves the package version, locates the numpy headers, and
//! assembles the compile/link description of the `_tskit` native module.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test fixtures for tskit-build unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    descriptor::{ExtensionBuilder, ExtensionDescriptor},
    error::ExtensionError,
    version::{resolve_version, VersionString},
};

pub use ops::{describe, ExtensionPlan};
pub use resolver::HeaderProbe;
pub use util::context::GlobalContext;
