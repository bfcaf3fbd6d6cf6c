//! Test fixtures for common test scenarios.
//!
//! [`VendorTreeFixture`] lays out a project root the way a tskit checkout
//! looks: the binding layer, the vendored C library, kastore, and the version
//! fragment, plus a stand-in numpy include directory next to it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::manifest::{SourceManifest, VendorLayout, VERSION_FILE};

/// Builder for an on-disk project tree.
#[derive(Debug, Clone)]
pub struct VendorTreeFixture {
    omit: HashSet<PathBuf>,
    version_source: Option<String>,
}

impl Default for VendorTreeFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl VendorTreeFixture {
    /// A complete tree with version `0.3.1`.
    pub fn new() -> Self {
        VendorTreeFixture {
            omit: HashSet::new(),
            version_source: Some(version_file("0.3.1")),
        }
    }

    /// Leave out one manifest file (path relative to the project root).
    pub fn without(mut self, path: impl AsRef<Path>) -> Self {
        self.omit.insert(path.as_ref().to_path_buf());
        self
    }

    /// Replace the version fragment's contents.
    pub fn with_version_source(mut self, source: impl Into<String>) -> Self {
        self.version_source = Some(source.into());
        self
    }

    /// Do not write a version fragment at all.
    pub fn without_version_file(mut self) -> Self {
        self.version_source = None;
        self
    }

    /// Materialize the tree in a fresh temporary directory.
    pub fn build(&self) -> VendorTree {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("tskit");
        let numpy_include = tmp.path().join("site-packages/numpy/core/include");
        std::fs::create_dir_all(&numpy_include).expect("create numpy include dir");

        let manifest = SourceManifest::for_layout(&VendorLayout::default());
        for path in manifest.paths() {
            if self.omit.contains(path) {
                continue;
            }
            write(&root.join(path), "/* fixture */\n");
        }

        if let Some(ref source) = self.version_source {
            write(&root.join(VERSION_FILE), source);
        }

        VendorTree {
            _tmp: tmp,
            root,
            numpy_include,
        }
    }
}

/// A materialized project tree; deleted on drop.
#[derive(Debug)]
pub struct VendorTree {
    _tmp: TempDir,
    root: PathBuf,
    numpy_include: PathBuf,
}

impl VendorTree {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn numpy_include(&self) -> PathBuf {
        self.numpy_include.clone()
    }

    pub fn version_path(&self) -> PathBuf {
        self.root.join(VERSION_FILE)
    }
}

/// Version fragment in the shape tskit ships it.
pub fn version_file(version: &str) -> String {
    format!(
        "# Definitive location for the version number.\n\
         # During development, should be x.y.z.devN\n\
         # For beta should be x.y.zbN\n\
         tskit_version = \"{}\"\n",
        version
    )
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture dir");
    }
    std::fs::write(path, contents).expect("write fixture file");
}
