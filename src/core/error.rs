//! Fatal errors raised while configuring the extension build.
//!
//! None of these are transient, so nothing retries them: the caller aborts the
//! build and no partial descriptor is ever produced.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::language::CStandard;
use crate::util::diagnostic::Diagnostic;

/// Error while resolving the version, the dependency headers, or the
/// extension descriptor.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ExtensionError {
    #[error("version source unreadable or malformed: {}", path.display())]
    #[diagnostic(
        code(tskit_build::config::version),
        help("The file must contain a line like `tskit_version = \"0.3.1\"`")
    )]
    Configuration { path: PathBuf, reason: String },

    #[error("source file missing: {}", path.display())]
    #[diagnostic(
        code(tskit_build::manifest::source_missing),
        help("Check that the vendored submodules are checked out")
    )]
    SourceMissing { path: PathBuf },

    #[error("dependency `{dependency}` is unavailable")]
    #[diagnostic(code(tskit_build::deps::missing))]
    DependencyMissing {
        dependency: String,
        reason: String,
        #[help]
        help: Option<String>,
    },

    #[error("{requested} is not supported by the `{toolchain}` toolchain")]
    #[diagnostic(
        code(tskit_build::toolchain::unsupported_std),
        help("Set `c_std_fallback = true` under [compiler] to accept the nearest successor")
    )]
    UnsupportedStandard {
        requested: CStandard,
        toolchain: String,
    },
}

impl ExtensionError {
    /// Whether this error belongs to the configuration class (bad version
    /// fragment or an unusable compiler setting).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ExtensionError::Configuration { .. } | ExtensionError::UnsupportedStandard { .. }
        )
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ExtensionError::Configuration { path, reason } => {
                Diagnostic::error("version source unreadable or malformed")
                    .with_location(path.clone())
                    .with_context(reason.clone())
                    .with_suggestion(
                        "Restore the version file or add a `tskit_version = \"<version>\"` assignment",
                    )
            }

            ExtensionError::SourceMissing { path } => {
                Diagnostic::error(format!("source file `{}` does not exist", path.display()))
                    .with_location(path.clone())
                    .with_context("every entry of the source manifest must be present on disk")
                    .with_suggestion("Run `git submodule update --init --recursive`")
                    .with_suggestion("Check that you are building from the repository root")
            }

            ExtensionError::DependencyMissing {
                dependency,
                reason,
                help,
            } => {
                let mut diag =
                    Diagnostic::error(format!("could not locate the `{}` headers", dependency))
                        .with_context(reason.clone());
                if let Some(help) = help {
                    diag = diag.with_suggestion(help.clone());
                }
                diag.with_suggestion(format!(
                    "Install `{}` into the interpreter used for the build",
                    dependency
                ))
                .with_suggestion("Or pass the header directory with `--numpy-include <dir>`")
            }

            ExtensionError::UnsupportedStandard {
                requested,
                toolchain,
            } => Diagnostic::error(format!(
                "{} is not supported by the `{}` toolchain",
                requested, toolchain
            ))
            .with_suggestion("Allow the nearest successor with `c_std_fallback = true`")
            .with_suggestion("Or build with a GCC or Clang toolchain"),
        }
    }
}
