//! Out-of-band version resolution.
//!
//! The package version lives in a Python fragment (`tskit/_version.py`) that
//! holds a single assignment. The package itself cannot be imported before its
//! extension is built, so the literal is parsed straight out of the file.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::ExtensionError;

/// Variable that holds the version in the fragment.
pub const VERSION_VARIABLE: &str = "tskit_version";

/// `name[: annotation] = [u]"literal"[;]`, optionally followed by a comment.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*(?::\s*[A-Za-z_][A-Za-z0-9_.]*\s*)?=\s*[uU]?(?:"([^"\\]*)"|'([^'\\]*)')\s*;?\s*(?:#.*)?$"#,
    )
    .expect("assignment pattern is valid")
});

/// A version string exactly as written in the version fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionString(String);

impl VersionString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the version from the fragment at `path`.
///
/// Fails with [`ExtensionError::Configuration`] if the file cannot be read or
/// holds no assignment to [`VERSION_VARIABLE`].
pub fn resolve_version(path: &Path) -> Result<VersionString, ExtensionError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ExtensionError::Configuration {
        path: path.to_path_buf(),
        reason: format!("failed to read version file: {}", e),
    })?;

    let version = parse_assignment(&contents, VERSION_VARIABLE).ok_or_else(|| {
        ExtensionError::Configuration {
            path: path.to_path_buf(),
            reason: format!("no `{} = \"...\"` assignment found", VERSION_VARIABLE),
        }
    })?;

    tracing::debug!("Resolved version {} from {}", version, path.display());
    Ok(VersionString(version))
}

/// Extract the string literal assigned to `variable`.
///
/// Only single-line assignments of a plain string literal are recognised.
/// The target may carry a type annotation (`tskit_version: str = ...`), the
/// literal may carry a `u` prefix, and a trailing `;` or comment is ignored.
/// Escapes, raw/byte/f-strings, triple quotes and computed values are not
/// evaluated. When the variable is assigned more than once the last
/// assignment wins.
pub fn parse_assignment(source: &str, variable: &str) -> Option<String> {
    source
        .lines()
        .filter_map(|line| ASSIGNMENT.captures(line))
        .filter(|caps| &caps[1] == variable)
        .filter_map(|caps| caps.get(2).or_else(|| caps.get(3)))
        .map(|m| m.as_str().to_string())
        .last()
}
