//! GCC/Clang toolchain implementation.

use std::path::{Path, PathBuf};

use crate::core::language::{CStandard, Define};

use super::{CommandSpec, CompileInput, Toolchain, ToolchainFamily};

/// GCC/Clang toolchain (Unix-like systems, MinGW).
#[derive(Debug, Clone)]
pub struct GccToolchain {
    /// Path to the C compiler
    pub cc: PathBuf,
    /// Compiler family (gcc, clang, apple-clang)
    pub family: ToolchainFamily,
}

impl GccToolchain {
    /// Create a new GCC-style toolchain.
    pub fn new(cc: PathBuf, family: ToolchainFamily) -> Self {
        GccToolchain { cc, family }
    }
}

impl Toolchain for GccToolchain {
    fn family(&self) -> ToolchainFamily {
        self.family
    }

    fn compiler_path(&self) -> &Path {
        &self.cc
    }

    fn supports_std(&self, _std: CStandard) -> bool {
        true
    }

    fn std_flag_value(&self, std: CStandard) -> String {
        format!("-std={}", std.as_flag_value())
    }

    fn include_flag(&self, dir: &Path) -> String {
        format!("-I{}", dir.display())
    }

    fn define_flag(&self, define: &Define) -> String {
        format!("-D{}", define)
    }

    fn undefine_flag(&self, name: &str) -> String {
        format!("-U{}", name)
    }

    fn compile_command(&self, input: &CompileInput) -> CommandSpec {
        // Compile only, position independent for the shared module
        CommandSpec::new(&self.cc)
            .arg("-c")
            .arg("-fPIC")
            .args(self.compile_flags(input))
            .arg(input.source.display().to_string())
            .arg("-o")
            .arg(input.output.display().to_string())
    }

    fn link_lib_flags(&self, libs: &[String]) -> Vec<String> {
        libs.iter().map(|lib| format!("-l{}", lib)).collect()
    }

    fn object_extension(&self) -> &str {
        "o"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_command() {
        let tc = GccToolchain::new(PathBuf::from("/usr/bin/gcc"), ToolchainFamily::Gcc);
        let input = CompileInput {
            source: PathBuf::from("lib/tskit/core.c"),
            output: PathBuf::from("build/core.o"),
            include_dirs: vec![PathBuf::from("lib")],
            defines: vec![Define::flag("WIN32"), Define::with_value("LEVEL", "1")],
            undefines: vec!["NDEBUG".to_string()],
            std_flag: Some("-std=c99".to_string()),
            cflags: vec!["-O2".to_string()],
        };

        let cmd = tc.compile_command(&input);
        assert_eq!(cmd.program, PathBuf::from("/usr/bin/gcc"));
        assert_eq!(
            cmd.args,
            vec![
                "-c",
                "-fPIC",
                "-std=c99",
                "-Ilib",
                "-DWIN32",
                "-DLEVEL=1",
                "-UNDEBUG",
                "-O2",
                "lib/tskit/core.c",
                "-o",
                "build/core.o",
            ]
        );
    }

    #[test]
    fn test_link_lib_flags() {
        let tc = GccToolchain::new(PathBuf::from("cc"), ToolchainFamily::Clang);
        assert_eq!(tc.link_lib_flags(&["Advapi32".to_string()]), vec!["-lAdvapi32"]);
    }
}
