//! Global context for tskit-build operations.
//!
//! Provides centralized access to the project root and configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::manifest::{BINDING_SOURCE, VERSION_FILE};
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Project root (the directory holding the binding layer)
    root: PathBuf,

    /// Merged configuration
    config: Config,
}

impl GlobalContext {
    /// Create a context for the project containing the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let root = find_project_root(&cwd)?;
        Ok(Self::with_root(root))
    }

    /// Create a context for an explicit project root.
    pub fn with_root(root: PathBuf) -> Self {
        let config = load_config(global_config_path().as_deref(), &project_config_path(&root));
        GlobalContext { root, config }
    }

    /// Get the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a mutable reference to the configuration, for CLI overrides.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Get the version fragment path.
    pub fn version_path(&self) -> PathBuf {
        self.root.join(VERSION_FILE)
    }
}

/// Find the project root by searching upward from `start` for the binding
/// layer source.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(BINDING_SOURCE).is_file() {
            tracing::debug!("Found project root at {}", dir.display());
            return Ok(dir.to_path_buf());
        }
        current = dir.parent();
    }

    bail!(
        "could not find `{}` in `{}` or any parent directory\n\
         help: Run from the tskit `python/` directory or pass `--root <dir>`",
        BINDING_SOURCE,
        start.display()
    )
}
