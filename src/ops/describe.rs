//! Implementation of `tskit-build describe`.
//!
//! Resolves the version, then assembles the extension descriptor. This is
//! the order the packaging front end needs them in: the version is part of
//! the package metadata, the descriptor is only consulted when compilation
//! starts.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::builder::compile_commands::COMPILE_COMMANDS_FILE;
use crate::core::descriptor::{ExtensionBuilder, ExtensionDescriptor};
use crate::core::error::ExtensionError;
use crate::core::manifest::{VendorLayout, PACKAGE_NAME};
use crate::core::platform::{HostSystem, PlatformProfile};
use crate::core::version::{resolve_version, VersionString};
use crate::ops::render::{write_compile_commands, RenderOptions};
use crate::resolver::numpy_probe;
use crate::util::GlobalContext;

/// Options shared by every command that assembles the descriptor.
///
/// Each field overrides the matching configuration value.
#[derive(Debug, Clone, Default)]
pub struct DescribeOptions {
    /// Host system identifier (defaults to the running host)
    pub system: Option<HostSystem>,

    /// Interpreter used to probe numpy
    pub python: Option<PathBuf>,

    /// numpy include directory; skips the probe
    pub numpy_include: Option<PathBuf>,
}

/// Everything the packaging front end needs to build the extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionPlan {
    /// Distribution package name
    pub package: String,
    /// Version string, verbatim from the version fragment
    pub version: VersionString,
    /// The native extension
    pub extension: ExtensionDescriptor,
    /// Digest of `extension`
    pub fingerprint: String,
}

/// Prepare the pending descriptor for the context's project.
pub fn extension_builder(ctx: &GlobalContext, opts: &DescribeOptions) -> ExtensionBuilder {
    let profile = match opts.system {
        Some(ref system) => PlatformProfile::for_system(system),
        None => PlatformProfile::host(),
    };
    ExtensionBuilder::new(ctx.root(), VendorLayout::default(), profile)
}

/// Assemble the descriptor, probing numpy as the last step.
pub fn extension_descriptor(
    ctx: &GlobalContext,
    opts: &DescribeOptions,
) -> Result<ExtensionDescriptor, ExtensionError> {
    let builder = extension_builder(ctx, opts);
    let python = &ctx.config().python;

    let include_override = opts
        .numpy_include
        .as_deref()
        .or(python.numpy_include.as_deref());
    let interpreter = opts.python.as_deref().or(python.interpreter.as_deref());

    // Sources are verified before the interpreter is even looked up.
    builder.finalize_with(|| numpy_probe(include_override, interpreter))
}

/// Resolve the version and the descriptor.
pub fn describe(ctx: &GlobalContext, opts: &DescribeOptions) -> Result<ExtensionPlan> {
    let version = resolve_version(&ctx.version_path())?;
    tracing::debug!("Resolved {} version {}", PACKAGE_NAME, version);

    let extension = extension_descriptor(ctx, opts)?;
    let fingerprint = extension.fingerprint();

    if ctx.config().build.emits_compile_commands() {
        let output = ctx.root().join(COMPILE_COMMANDS_FILE);
        write_compile_commands(ctx, &extension, &RenderOptions::default(), &output)?;
    }

    Ok(ExtensionPlan {
        package: PACKAGE_NAME.to_string(),
        version,
        extension,
        fingerprint,
    })
}
