//! Configuration file support for tskit-build.
//!
//! Two configuration file locations are read:
//! - Global: `~/.tskit-build/config.toml` - User-wide defaults
//! - Project: `<root>/.tskit-build/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, field by field.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the directory holding configuration files.
pub const CONFIG_DIR: &str = ".tskit-build";

/// tskit-build configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Python / numpy settings
    pub python: PythonConfig,

    /// Compiler settings
    pub compiler: CompilerConfig,

    /// Output settings
    pub build: BuildConfig,
}

/// Settings for locating the numpy headers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonConfig {
    /// Interpreter used to probe numpy (path or name on PATH)
    pub interpreter: Option<PathBuf>,

    /// numpy include directory; skips running the interpreter
    pub numpy_include: Option<PathBuf>,
}

/// Settings for rendering compiler flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Path to the C compiler (e.g., /usr/bin/clang)
    pub cc: Option<PathBuf>,

    /// Compiler family override (gcc, clang, apple-clang, msvc)
    pub family: Option<String>,

    /// Accept the nearest stricter C standard when C99 has no switch
    pub c_std_fallback: Option<bool>,
}

impl CompilerConfig {
    /// Whether the C standard fallback is allowed (default: true).
    pub fn allows_std_fallback(&self) -> bool {
        self.c_std_fallback.unwrap_or(true)
    }
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Write compile_commands.json alongside `describe`
    pub emit_compile_commands: Option<bool>,
}

impl BuildConfig {
    /// Whether `describe` writes compile_commands.json (default: false).
    pub fn emits_compile_commands(&self) -> bool {
        self.emit_compile_commands.unwrap_or(false)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Python settings
        if other.python.interpreter.is_some() {
            self.python.interpreter = other.python.interpreter;
        }
        if other.python.numpy_include.is_some() {
            self.python.numpy_include = other.python.numpy_include;
        }

        // Compiler settings
        if other.compiler.cc.is_some() {
            self.compiler.cc = other.compiler.cc;
        }
        if other.compiler.family.is_some() {
            self.compiler.family = other.compiler.family;
        }
        if other.compiler.c_std_fallback.is_some() {
            self.compiler.c_std_fallback = other.compiler.c_std_fallback;
        }

        // Build settings
        if other.build.emit_compile_commands.is_some() {
            self.build.emit_compile_commands = other.build.emit_compile_commands;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`<root>/.tskit-build/config.toml`)
/// 2. Global config (`~/.tskit-build/config.toml`)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config directory (`~/.tskit-build`).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (`~/.tskit-build/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (`<root>/.tskit-build/config.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.toml")
}
