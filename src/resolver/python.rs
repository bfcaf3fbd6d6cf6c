//! Python interpreter discovery.

use std::path::{Path, PathBuf};

use crate::core::error::ExtensionError;
use crate::util::process::find_executable;

/// The interpreter used to run build-time probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonInterpreter {
    path: PathBuf,
}

impl PythonInterpreter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PythonInterpreter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Locate an interpreter.
    ///
    /// Search order:
    /// 1. `explicit` (config or `--python`), as a path or a name on PATH
    /// 2. The active virtual environment (`VIRTUAL_ENV`)
    /// 3. `python3`, then `python` on PATH
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ExtensionError> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok(Self::new(path));
            }
            if let Some(found) = path.to_str().and_then(find_executable) {
                return Ok(Self::new(found));
            }
            return Err(ExtensionError::DependencyMissing {
                dependency: "numpy".to_string(),
                reason: format!("configured Python interpreter not found: {}", path.display()),
                help: Some("Point `interpreter` under [python] at an existing executable".into()),
            });
        }

        if let Ok(venv) = std::env::var("VIRTUAL_ENV") {
            if let Some(python) = venv_python(Path::new(&venv)) {
                tracing::debug!("Using virtualenv interpreter {}", python.display());
                return Ok(Self::new(python));
            }
        }

        ["python3", "python"]
            .iter()
            .find_map(|name| find_executable(name))
            .map(Self::new)
            .ok_or_else(|| ExtensionError::DependencyMissing {
                dependency: "numpy".to_string(),
                reason: "no Python interpreter found on PATH".to_string(),
                help: Some("Install Python 3 or set `interpreter` under [python]".into()),
            })
    }
}

fn venv_python(prefix: &Path) -> Option<PathBuf> {
    #[cfg(unix)]
    let python = prefix.join("bin").join("python");
    #[cfg(windows)]
    let python = prefix.join("Scripts").join("python.exe");

    python.is_file().then_some(python)
}
