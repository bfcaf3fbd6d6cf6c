//! Build-time dependency header resolution.
//!
//! A [`HeaderProbe`] answers one question: where are a dependency's C
//! headers? Probes are only invoked when an extension descriptor is
//! finalized, since the dependency may not be installed yet when the build
//! configuration is first loaded.

use std::path::{Path, PathBuf};

use crate::core::error::ExtensionError;

mod numpy;
mod python;

pub use numpy::{NumpyHeaders, GUARDED_INCLUDE_PROBE};
pub use python::PythonInterpreter;

/// Locates the include directory of a build-time dependency.
pub trait HeaderProbe {
    /// Name of the dependency, for diagnostics.
    fn dependency(&self) -> &str;

    /// Resolve the include directory.
    fn include_dir(&self) -> Result<PathBuf, ExtensionError>;
}

/// A header directory supplied up front (config or command line).
#[derive(Debug, Clone)]
pub struct StaticHeaders {
    dependency: String,
    dir: PathBuf,
}

impl StaticHeaders {
    pub fn new(dependency: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        StaticHeaders {
            dependency: dependency.into(),
            dir: dir.into(),
        }
    }
}

impl HeaderProbe for StaticHeaders {
    fn dependency(&self) -> &str {
        &self.dependency
    }

    fn include_dir(&self) -> Result<PathBuf, ExtensionError> {
        numpy::check_include_dir(&self.dir).map_err(|reason| ExtensionError::DependencyMissing {
            dependency: self.dependency.clone(),
            reason,
            help: Some("Check the configured `numpy_include` directory".to_string()),
        })?;
        Ok(self.dir.clone())
    }
}

/// Pick the numpy probe: an explicit directory wins over running Python.
pub fn numpy_probe(
    include_override: Option<&Path>,
    interpreter: Option<&Path>,
) -> Result<Box<dyn HeaderProbe>, ExtensionError> {
    if let Some(dir) = include_override {
        tracing::debug!("Using configured numpy include {}", dir.display());
        return Ok(Box::new(StaticHeaders::new("numpy", dir)));
    }

    let python = PythonInterpreter::discover(interpreter)?;
    Ok(Box::new(NumpyHeaders::new(python)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_static_headers() {
        let tmp = TempDir::new().unwrap();
        let probe = StaticHeaders::new("numpy", tmp.path());
        assert_eq!(probe.include_dir().unwrap(), tmp.path());
        assert_eq!(probe.dependency(), "numpy");
    }

    #[test]
    fn test_static_headers_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let probe = StaticHeaders::new("numpy", tmp.path().join("absent"));
        let err = probe.include_dir().unwrap_err();
        assert!(matches!(err, ExtensionError::DependencyMissing { .. }));
    }

    #[test]
    fn test_override_skips_interpreter() {
        let tmp = TempDir::new().unwrap();
        let probe = numpy_probe(Some(tmp.path()), Some(&tmp.path().join("no-python"))).unwrap();
        assert_eq!(probe.include_dir().unwrap(), tmp.path());
    }
}
