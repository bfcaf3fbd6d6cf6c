//! Host platform detection and the link/compile requirements it implies.

use serde::{Deserialize, Serialize};

use crate::core::language::Define;

/// System identifier that selects the Windows profile.
pub const WINDOWS: &str = "Windows";

/// Host operating system identifier, in the `platform.system()` vocabulary
/// (`Linux`, `Darwin`, `Windows`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostSystem(String);

impl HostSystem {
    pub fn new(id: impl Into<String>) -> Self {
        HostSystem(id.into())
    }

    /// Identify the system this binary is running on.
    pub fn host() -> Self {
        let id = match std::env::consts::OS {
            "windows" => WINDOWS,
            "linux" => "Linux",
            "macos" => "Darwin",
            "freebsd" => "FreeBSD",
            "openbsd" => "OpenBSD",
            "netbsd" => "NetBSD",
            "solaris" | "illumos" => "SunOS",
            other => other,
        };
        HostSystem(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_windows(&self) -> bool {
        self.0 == WINDOWS
    }
}

impl std::fmt::Display for HostSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Platform-conditional build requirements.
///
/// Exactly one profile is selected per build. Profiles are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    /// System the profile was selected for
    pub system: HostSystem,
    /// Extra libraries to link (without prefix/suffix)
    pub libraries: Vec<String>,
    /// Extra preprocessor definitions
    pub defines: Vec<Define>,
    /// Extra compiler flags
    pub extra_compile_args: Vec<String>,
}

impl PlatformProfile {
    /// Select the profile for `system`.
    pub fn for_system(system: &HostSystem) -> Self {
        if system.is_windows() {
            // Advapi32 provides the UUID generation kastore relies on.
            PlatformProfile {
                system: system.clone(),
                libraries: vec!["Advapi32".to_string()],
                defines: vec![Define::flag("WIN32")],
                extra_compile_args: Vec::new(),
            }
        } else {
            PlatformProfile {
                system: system.clone(),
                libraries: Vec::new(),
                defines: Vec::new(),
                extra_compile_args: Vec::new(),
            }
        }
    }

    /// Profile for the system this binary runs on.
    pub fn host() -> Self {
        Self::for_system(&HostSystem::host())
    }
}
