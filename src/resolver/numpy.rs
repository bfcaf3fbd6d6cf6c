//! Locating numpy's C headers at build time.
//!
//! numpy refuses to be imported while it believes its own `setup.py` is
//! running (it checks `builtins.__NUMPY_SETUP__`). When numpy is itself a
//! build requirement being installed in the same environment, that flag can be
//! left set, so the probe clears it before importing.

use std::path::{Path, PathBuf};

use crate::core::error::ExtensionError;
use crate::util::process::ProcessBuilder;

use super::{HeaderProbe, PythonInterpreter};

/// Program run by the probe interpreter.
///
/// Precondition: runs in a fresh interpreter owned by the probe.
/// Postcondition: prints the include directory as the last stdout line. The
/// guard write dies with the child process and is never read back here.
pub const GUARDED_INCLUDE_PROBE: &str = "\
import builtins
builtins.__NUMPY_SETUP__ = False
import numpy
print(numpy.get_include())
";

/// Header probe for numpy, backed by a Python interpreter.
#[derive(Debug, Clone)]
pub struct NumpyHeaders {
    interpreter: PythonInterpreter,
}

impl NumpyHeaders {
    pub fn new(interpreter: PythonInterpreter) -> Self {
        NumpyHeaders { interpreter }
    }

    fn missing(&self, reason: impl Into<String>, help: Option<String>) -> ExtensionError {
        ExtensionError::DependencyMissing {
            dependency: "numpy".to_string(),
            reason: reason.into(),
            help,
        }
    }
}

impl HeaderProbe for NumpyHeaders {
    fn dependency(&self) -> &str {
        "numpy"
    }

    fn include_dir(&self) -> Result<PathBuf, ExtensionError> {
        let python = self.interpreter.path();
        tracing::debug!("Probing numpy headers with {}", python.display());

        let output = ProcessBuilder::new(python)
            .args(["-c", GUARDED_INCLUDE_PROBE])
            .env("PYTHONDONTWRITEBYTECODE", "1")
            .exec()
            .map_err(|e| self.missing(format!("{:#}", e), None))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("numpy import failed")
                .trim()
                .to_string();
            return Err(self.missing(
                reason,
                Some(format!(
                    "Check that `{} -c \"import numpy\"` succeeds",
                    python.display()
                )),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let dir = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| self.missing("numpy reported no include directory", None))?;

        check_include_dir(&dir).map_err(|reason| self.missing(reason, None))?;

        tracing::info!("Using numpy headers from {}", dir.display());
        Ok(dir)
    }
}

pub(super) fn check_include_dir(dir: &Path) -> Result<(), String> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(format!(
            "include directory does not exist: {}",
            dir.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_cleared_before_import() {
        let guard = GUARDED_INCLUDE_PROBE
            .find("__NUMPY_SETUP__ = False")
            .unwrap();
        let import = GUARDED_INCLUDE_PROBE.find("import numpy").unwrap();
        let lookup = GUARDED_INCLUDE_PROBE.find("get_include()").unwrap();
        assert!(guard < import);
        assert!(import < lookup);
    }

    #[cfg(unix)]
    mod unix {
        use std::os::unix::fs::PermissionsExt;

        use tempfile::TempDir;

        use super::*;

        fn fake_python(dir: &Path, body: &str) -> PythonInterpreter {
            let path = dir.join("python");
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            PythonInterpreter::new(path)
        }

        #[test]
        fn test_probe_reads_last_stdout_line() {
            let tmp = TempDir::new().unwrap();
            let include = tmp.path().join("numpy").join("core").join("include");
            std::fs::create_dir_all(&include).unwrap();

            let python = fake_python(
                tmp.path(),
                &format!("echo 'warming up'\necho '{}'", include.display()),
            );
            let dir = NumpyHeaders::new(python).include_dir().unwrap();
            assert_eq!(dir, include);
        }

        #[test]
        fn test_probe_import_failure() {
            let tmp = TempDir::new().unwrap();
            let python = fake_python(
                tmp.path(),
                "echo 'Traceback (most recent call last):' >&2\n\
                 echo \"ModuleNotFoundError: No module named 'numpy'\" >&2\n\
                 exit 1",
            );

            match NumpyHeaders::new(python).include_dir() {
                Err(ExtensionError::DependencyMissing { reason, .. }) => {
                    assert_eq!(reason, "ModuleNotFoundError: No module named 'numpy'");
                }
                other => panic!("expected DependencyMissing, got {:?}", other),
            }
        }

        #[test]
        fn test_probe_nonexistent_include_dir() {
            let tmp = TempDir::new().unwrap();
            let python = fake_python(tmp.path(), "echo /definitely/not/here");

            let err = NumpyHeaders::new(python).include_dir().unwrap_err();
            assert!(matches!(err, ExtensionError::DependencyMissing { .. }));
        }

        #[test]
        fn test_probe_missing_interpreter() {
            let tmp = TempDir::new().unwrap();
            let python = PythonInterpreter::new(tmp.path().join("no-python"));

            let err = NumpyHeaders::new(python).include_dir().unwrap_err();
            assert!(matches!(err, ExtensionError::DependencyMissing { .. }));
        }
    }
}
