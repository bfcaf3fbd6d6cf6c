//! The fixed source manifest of the `_tskit` extension.
//!
//! Sources are enumerated explicitly rather than globbed: a new C file in the
//! vendor tree only becomes part of the extension once it is listed here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::ExtensionError;

/// Name of the compiled extension module.
pub const MODULE_NAME: &str = "_tskit";

/// Name of the Python package the extension ships in.
pub const PACKAGE_NAME: &str = "tskit";

/// The binding layer, at the project root.
pub const BINDING_SOURCE: &str = "_tskitmodule.c";

/// Root of the vendored native sources.
pub const VENDOR_DIR: &str = "lib";

/// Core library sources, relative to `lib/tskit`.
pub const CORE_SOURCES: &[&str] = &[
    "core.c",
    "tables.c",
    "trees.c",
    "genotypes.c",
    "stats.c",
    "convert.c",
    "haplotype_matching.c",
];

/// Location of the version fragment, relative to the project root.
pub const VERSION_FILE: &str = "tskit/_version.py";

/// Which tree a source file comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceGroup {
    /// The Python binding layer.
    Binding,
    /// The vendored tskit C library.
    Core,
    /// The vendored kastore serialization library.
    Serialization,
}

impl SourceGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceGroup::Binding => "binding",
            SourceGroup::Core => "core",
            SourceGroup::Serialization => "serialization",
        }
    }
}

/// A single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Path relative to the project root
    pub path: PathBuf,
    /// Provenance of the file
    pub group: SourceGroup,
}

/// Relative layout of the vendor tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorLayout {
    /// Root of the vendored sources (`lib`)
    pub vendor_dir: PathBuf,
}

impl Default for VendorLayout {
    fn default() -> Self {
        VendorLayout {
            vendor_dir: PathBuf::from(VENDOR_DIR),
        }
    }
}

impl VendorLayout {
    /// Directory holding the core library sources (`lib/tskit`).
    pub fn core_dir(&self) -> PathBuf {
        self.vendor_dir.join("tskit")
    }

    /// Directory holding the serialization library (`lib/subprojects/kastore`).
    pub fn kastore_dir(&self) -> PathBuf {
        self.vendor_dir.join("subprojects").join("kastore")
    }

    /// Include directories contributed by the vendor tree, in order.
    pub fn include_dirs(&self) -> Vec<PathBuf> {
        vec![self.vendor_dir.clone(), self.kastore_dir()]
    }
}

/// Ordered list of the extension's sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceManifest {
    entries: Vec<SourceEntry>,
}

impl SourceManifest {
    /// Build the manifest for the given layout: the binding layer, then the
    /// core library, then kastore.
    pub fn for_layout(layout: &VendorLayout) -> Self {
        let core_dir = layout.core_dir();

        let mut entries = Vec::with_capacity(CORE_SOURCES.len() + 2);
        entries.push(SourceEntry {
            path: PathBuf::from(BINDING_SOURCE),
            group: SourceGroup::Binding,
        });
        entries.extend(CORE_SOURCES.iter().map(|file| SourceEntry {
            path: core_dir.join(file),
            group: SourceGroup::Core,
        }));
        entries.push(SourceEntry {
            path: layout.kastore_dir().join("kastore.c"),
            group: SourceGroup::Serialization,
        });

        SourceManifest { entries }
    }

    pub fn entries(&self) -> &[SourceEntry] {
        &self.entries
    }

    /// Relative source paths, in manifest order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.path.as_path())
    }

    /// Entries belonging to one provenance group.
    pub fn group(&self, group: SourceGroup) -> impl Iterator<Item = &SourceEntry> {
        self.entries.iter().filter(move |e| e.group == group)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every entry exists under `root`.
    ///
    /// Reports the first missing path, relative to `root`.
    pub fn verify(&self, root: &Path) -> Result<(), ExtensionError> {
        for entry in &self.entries {
            if !root.join(&entry.path).is_file() {
                tracing::debug!(
                    "Manifest entry missing: {} ({})",
                    entry.path.display(),
                    entry.group.as_str()
                );
                return Err(ExtensionError::SourceMissing {
                    path: entry.path.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::test_support::fixtures::VendorTreeFixture;

    #[test]
    fn test_manifest_order_and_groups() {
        let manifest = SourceManifest::for_layout(&VendorLayout::default());
        let paths: Vec<_> = manifest.paths().map(Path::to_path_buf).collect();

        assert_eq!(paths.len(), 9);
        assert_eq!(paths[0], PathBuf::from("_tskitmodule.c"));
        assert_eq!(paths[1], Path::new("lib").join("tskit").join("core.c"));
        assert_eq!(
            paths[8],
            Path::new("lib").join("subprojects").join("kastore").join("kastore.c")
        );

        assert_eq!(manifest.group(SourceGroup::Binding).count(), 1);
        assert_eq!(manifest.group(SourceGroup::Core).count(), 7);
        assert_eq!(manifest.group(SourceGroup::Serialization).count(), 1);
    }

    #[test]
    fn test_manifest_has_no_duplicates() {
        let manifest = SourceManifest::for_layout(&VendorLayout::default());
        let unique: HashSet<_> = manifest.paths().collect();
        assert_eq!(unique.len(), manifest.len());
    }

    #[test]
    fn test_vendored_entries_rooted_under_vendor_dir() {
        let layout = VendorLayout::default();
        let manifest = SourceManifest::for_layout(&layout);
        for entry in manifest.entries() {
            if entry.group != SourceGroup::Binding {
                assert!(entry.path.starts_with(&layout.vendor_dir));
            }
        }
    }

    #[test]
    fn test_verify_complete_tree() {
        let fixture = VendorTreeFixture::new().build();
        let manifest = SourceManifest::for_layout(&VendorLayout::default());
        assert!(manifest.verify(fixture.root()).is_ok());
    }

    #[test]
    fn test_verify_reports_missing_path() {
        let fixture = VendorTreeFixture::new()
            .without("lib/tskit/stats.c")
            .build();
        let manifest = SourceManifest::for_layout(&VendorLayout::default());

        match manifest.verify(fixture.root()) {
            Err(ExtensionError::SourceMissing { path }) => {
                assert_eq!(path, Path::new("lib").join("tskit").join("stats.c"));
            }
            other => panic!("expected SourceMissing, got {:?}", other),
        }
    }
}
