//! MSVC toolchain implementation.

use std::path::{Path, PathBuf};

use crate::core::language::{CStandard, Define};

use super::{CommandSpec, CompileInput, Toolchain, ToolchainFamily};

/// MSVC toolchain (Windows).
#[derive(Debug, Clone)]
pub struct MsvcToolchain {
    /// Path to cl.exe (compiler)
    pub cl: PathBuf,
}

impl MsvcToolchain {
    /// Create a new MSVC toolchain.
    pub fn new(cl: PathBuf) -> Self {
        MsvcToolchain { cl }
    }
}

impl Toolchain for MsvcToolchain {
    fn family(&self) -> ToolchainFamily {
        ToolchainFamily::Msvc
    }

    fn compiler_path(&self) -> &Path {
        &self.cl
    }

    // cl.exe only gained /std switches for C with C11 and C17.
    fn supports_std(&self, std: CStandard) -> bool {
        matches!(std, CStandard::C11 | CStandard::C17)
    }

    fn std_flag_value(&self, std: CStandard) -> String {
        format!("/std:{}", std.as_flag_value())
    }

    fn include_flag(&self, dir: &Path) -> String {
        format!("/I{}", dir.display())
    }

    fn define_flag(&self, define: &Define) -> String {
        format!("/D{}", define)
    }

    fn undefine_flag(&self, name: &str) -> String {
        format!("/U{}", name)
    }

    fn compile_command(&self, input: &CompileInput) -> CommandSpec {
        // Quiet logo, compile only, force C
        CommandSpec::new(&self.cl)
            .arg("/nologo")
            .arg("/c")
            .arg("/TC")
            .args(self.compile_flags(input))
            .arg(input.source.display().to_string())
            .arg(format!("/Fo{}", input.output.display()))
    }

    fn link_lib_flags(&self, libs: &[String]) -> Vec<String> {
        libs.iter()
            .map(|lib| {
                if lib.to_lowercase().ends_with(".lib") {
                    lib.clone()
                } else {
                    format!("{}.lib", lib)
                }
            })
            .collect()
    }

    fn object_extension(&self) -> &str {
        "obj"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_command() {
        let tc = MsvcToolchain::new(PathBuf::from("cl.exe"));
        let input = CompileInput {
            source: PathBuf::from("_tskitmodule.c"),
            output: PathBuf::from("build/_tskitmodule.obj"),
            include_dirs: vec![PathBuf::from("lib")],
            defines: vec![Define::flag("WIN32")],
            undefines: vec!["NDEBUG".to_string()],
            std_flag: Some("/std:c11".to_string()),
            cflags: Vec::new(),
        };

        let cmd = tc.compile_command(&input);
        assert_eq!(
            cmd.args,
            vec![
                "/nologo",
                "/c",
                "/TC",
                "/std:c11",
                "/Ilib",
                "/DWIN32",
                "/UNDEBUG",
                "_tskitmodule.c",
                "/Fobuild/_tskitmodule.obj",
            ]
        );
    }

    #[test]
    fn test_link_lib_flags() {
        let tc = MsvcToolchain::new(PathBuf::from("cl.exe"));
        assert_eq!(
            tc.link_lib_flags(&["Advapi32".to_string(), "user32.lib".to_string()]),
            vec!["Advapi32.lib", "user32.lib"]
        );
    }

    #[test]
    fn test_no_c99_switch() {
        let tc = MsvcToolchain::new(PathBuf::from("cl.exe"));
        assert!(!tc.supports_std(CStandard::C99));
        assert!(tc.supports_std(CStandard::C11));
    }
}
