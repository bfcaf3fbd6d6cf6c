//! Toolchain detection functions.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::util::config::CompilerConfig;
use crate::util::process::{find_c_compiler, ProcessBuilder};

use super::{GccToolchain, MsvcToolchain, Toolchain, ToolchainFamily};

/// Detect the toolchain used to render flags.
///
/// An explicit family needs no compiler on disk: the flags can be rendered
/// for a driver that only exists on the build machine. Otherwise the
/// configured compiler, `CC`, or the first compiler on PATH is probed.
pub fn detect_toolchain(config: &CompilerConfig) -> Result<Box<dyn Toolchain>> {
    let family = config
        .family
        .as_deref()
        .map(str::parse::<ToolchainFamily>)
        .transpose()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    // A family override without an explicit compiler picks that family's
    // driver rather than whatever CC or PATH happens to offer.
    let cc = match (&config.cc, family) {
        (Some(cc), _) => Some(cc.clone()),
        (None, Some(_)) => None,
        (None, None) => find_c_compiler(),
    };

    let (cc, family) = match (cc, family) {
        (Some(cc), Some(family)) => (cc, family),
        (Some(cc), None) => {
            let family = detect_family(&cc);
            (cc, family)
        }
        (None, Some(family)) => (default_driver(family), family),
        (None, None) => bail!(
            "no C compiler found\n\
             \n\
             Rendering flags requires a C compiler (gcc, clang, or cl).\n\
             Set the CC environment variable, set `family` under [compiler],\n\
             or pass `--toolchain <family>`."
        ),
    };

    tracing::debug!("Using {} toolchain at {}", family, cc.display());

    Ok(match family {
        ToolchainFamily::Msvc => Box::new(MsvcToolchain::new(cc)),
        other => Box::new(GccToolchain::new(cc, other)),
    })
}

fn default_driver(family: ToolchainFamily) -> PathBuf {
    PathBuf::from(match family {
        ToolchainFamily::Gcc => "gcc",
        ToolchainFamily::Clang | ToolchainFamily::AppleClang => "clang",
        ToolchainFamily::Msvc => "cl.exe",
    })
}

/// Detect the compiler family from the binary name, then `--version`.
pub fn detect_family(cc: &Path) -> ToolchainFamily {
    let name = cc
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

    if name == "cl" || name == "clang-cl" {
        return ToolchainFamily::Msvc;
    }
    if name.contains("gcc") {
        return ToolchainFamily::Gcc;
    }

    match ProcessBuilder::new(cc).arg("--version").exec() {
        Ok(output) => family_from_version(&String::from_utf8_lossy(&output.stdout)),
        Err(e) => {
            tracing::debug!("Could not probe {}: {:#}", cc.display(), e);
            ToolchainFamily::Gcc
        }
    }
}

/// Classify `--version` output. Anything unrecognised is treated as GCC.
fn family_from_version(stdout: &str) -> ToolchainFamily {
    let stdout = stdout.to_lowercase();
    if stdout.contains("apple") && stdout.contains("clang") {
        ToolchainFamily::AppleClang
    } else if stdout.contains("clang") {
        ToolchainFamily::Clang
    } else {
        ToolchainFamily::Gcc
    }
}
