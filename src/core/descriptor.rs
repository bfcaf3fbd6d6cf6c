//! Extension descriptor assembly.
//!
//! Assembly happens in two steps. [`ExtensionBuilder`] captures everything
//! that is known when the build configuration is loaded: the project root,
//! the fixed source manifest and the platform profile. The numpy headers are
//! only looked up in [`ExtensionBuilder::finalize`], when the compiler
//! driver actually asks for settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::ExtensionError;
use crate::core::language::{CStandard, Define};
use crate::core::manifest::{SourceManifest, VendorLayout, MODULE_NAME};
use crate::core::platform::PlatformProfile;
use crate::resolver::HeaderProbe;
use crate::util::hash::Fingerprint;

/// Macro undefined so that `assert()` stays active in optimized builds.
pub const ASSERTION_MACRO: &str = "NDEBUG";

/// The complete, immutable compile/link description of the extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    /// Extension module name
    name: String,
    /// Sources relative to the project root, in manifest order
    sources: SourceManifest,
    /// Include directories, vendor directories first
    include_dirs: Vec<PathBuf>,
    /// Preprocessor definitions
    define_macros: Vec<Define>,
    /// Libraries to link
    libraries: Vec<String>,
    /// Extra compiler flags
    extra_compile_args: Vec<String>,
    /// Required C standard
    c_std: CStandard,
    /// Whether assertions stay compiled in
    assertions: bool,
}

impl ExtensionDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sources(&self) -> &SourceManifest {
        &self.sources
    }

    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    pub fn define_macros(&self) -> &[Define] {
        &self.define_macros
    }

    /// Macros that must be undefined on the command line.
    pub fn undef_macros(&self) -> Vec<&'static str> {
        if self.assertions {
            vec![ASSERTION_MACRO]
        } else {
            Vec::new()
        }
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    pub fn extra_compile_args(&self) -> &[String] {
        &self.extra_compile_args
    }

    pub fn c_std(&self) -> CStandard {
        self.c_std
    }

    pub fn assertions_enabled(&self) -> bool {
        self.assertions
    }

    /// Stable digest over every field, in order.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        fp.section("name").update_str(&self.name);

        fp.section("sources");
        for entry in self.sources.entries() {
            fp.update_str(entry.group.as_str())
                .update_str(&entry.path.to_string_lossy());
        }

        fp.section("include_dirs");
        for dir in &self.include_dirs {
            fp.update_str(&dir.to_string_lossy());
        }

        fp.section("define_macros");
        for define in &self.define_macros {
            fp.update_str(&define.name).update_opt(define.value.as_deref());
        }

        fp.section("libraries")
            .update_strs(self.libraries.iter().map(String::as_str));
        fp.section("extra_compile_args")
            .update_strs(self.extra_compile_args.iter().map(String::as_str));
        fp.section("c_std").update_str(self.c_std.as_flag_value());
        fp.section("assertions")
            .update_str(if self.assertions { "on" } else { "off" });

        fp.finish()
    }
}

/// Pending descriptor, waiting for the dependency headers.
#[derive(Debug, Clone)]
pub struct ExtensionBuilder {
    root: PathBuf,
    layout: VendorLayout,
    manifest: SourceManifest,
    profile: PlatformProfile,
}

impl ExtensionBuilder {
    /// Prepare a descriptor for the project at `root`.
    ///
    /// Nothing is read from disk and no dependency is probed yet.
    pub fn new(root: impl Into<PathBuf>, layout: VendorLayout, profile: PlatformProfile) -> Self {
        let manifest = SourceManifest::for_layout(&layout);
        ExtensionBuilder {
            root: root.into(),
            layout,
            manifest,
            profile,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &SourceManifest {
        &self.manifest
    }

    /// Validate the source tree, resolve the dependency headers, and produce
    /// the descriptor.
    ///
    /// Sources are checked first so a broken checkout is reported without
    /// touching the dependency. The probe runs last, immediately before its
    /// result is used.
    pub fn finalize(&self, headers: &dyn HeaderProbe) -> Result<ExtensionDescriptor, ExtensionError> {
        self.manifest.verify(&self.root)?;
        self.assemble(headers)
    }

    /// Like [`finalize`](Self::finalize), but the header lookup itself is
    /// only constructed once the sources have been verified.
    pub fn finalize_with<F>(&self, headers: F) -> Result<ExtensionDescriptor, ExtensionError>
    where
        F: FnOnce() -> Result<Box<dyn HeaderProbe>, ExtensionError>,
    {
        self.manifest.verify(&self.root)?;
        let headers = headers()?;
        self.assemble(headers.as_ref())
    }

    fn assemble(&self, headers: &dyn HeaderProbe) -> Result<ExtensionDescriptor, ExtensionError> {
        let mut include_dirs = self.layout.include_dirs();
        let dependency_dir = headers.include_dir()?;
        tracing::debug!(
            "Adding {} include directory {}",
            headers.dependency(),
            dependency_dir.display()
        );
        include_dirs.push(dependency_dir);

        let descriptor = ExtensionDescriptor {
            name: MODULE_NAME.to_string(),
            sources: self.manifest.clone(),
            include_dirs,
            define_macros: self.profile.defines.clone(),
            libraries: self.profile.libraries.clone(),
            extra_compile_args: self.profile.extra_compile_args.clone(),
            c_std: CStandard::C99,
            assertions: true,
        };

        tracing::info!(
            "Assembled `{}`: {} sources, {} include dirs, {} libraries ({})",
            descriptor.name,
            descriptor.sources.len(),
            descriptor.include_dirs.len(),
            descriptor.libraries.len(),
            self.profile.system
        );

        Ok(descriptor)
    }
}
