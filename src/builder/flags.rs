//! Rendering an extension descriptor into toolchain flags.

use std::path::{Path, PathBuf};

use crate::builder::toolchain::{std_flag, CompileInput, Toolchain};
use crate::core::descriptor::ExtensionDescriptor;
use crate::core::error::ExtensionError;

/// Directory, relative to the project root, that receives object files.
pub const OBJECT_DIR: &str = "build";

/// Turns a descriptor into command lines for one toolchain.
pub struct FlagRenderer<'a> {
    toolchain: &'a dyn Toolchain,
    descriptor: &'a ExtensionDescriptor,
    std_flag: String,
}

impl<'a> FlagRenderer<'a> {
    /// Resolve the language-standard switch up front so an unsupported
    /// standard fails before any command is rendered.
    pub fn new(
        toolchain: &'a dyn Toolchain,
        descriptor: &'a ExtensionDescriptor,
        allow_std_fallback: bool,
    ) -> Result<Self, ExtensionError> {
        let std_flag = std_flag(toolchain, descriptor.c_std(), allow_std_fallback)?;
        Ok(FlagRenderer {
            toolchain,
            descriptor,
            std_flag,
        })
    }

    pub fn toolchain(&self) -> &dyn Toolchain {
        self.toolchain
    }

    pub fn descriptor(&self) -> &ExtensionDescriptor {
        self.descriptor
    }

    /// The rendered language-standard switch.
    pub fn std_flag(&self) -> &str {
        &self.std_flag
    }

    /// Compile input for one manifest source.
    pub fn compile_input(&self, source: &Path, object_dir: &Path) -> CompileInput {
        CompileInput {
            source: source.to_path_buf(),
            output: self.object_path(source, object_dir),
            include_dirs: self.descriptor.include_dirs().to_vec(),
            defines: self.descriptor.define_macros().to_vec(),
            undefines: self
                .descriptor
                .undef_macros()
                .into_iter()
                .map(String::from)
                .collect(),
            std_flag: Some(self.std_flag.clone()),
            cflags: self.descriptor.extra_compile_args().to_vec(),
        }
    }

    /// Object file for `source`, mirroring its relative path under
    /// `object_dir`.
    pub fn object_path(&self, source: &Path, object_dir: &Path) -> PathBuf {
        object_dir
            .join(source)
            .with_extension(self.toolchain.object_extension())
    }

    /// Flags shared by every translation unit.
    pub fn compile_flags(&self) -> Vec<String> {
        let input = self.compile_input(Path::new(""), Path::new(""));
        self.toolchain.compile_flags(&input)
    }

    /// Flags naming the libraries to link.
    pub fn link_flags(&self) -> Vec<String> {
        self.toolchain.link_lib_flags(self.descriptor.libraries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::toolchain::{GccToolchain, MsvcToolchain, ToolchainFamily};
    use crate::core::descriptor::ExtensionBuilder;
    use crate::core::manifest::VendorLayout;
    use crate::core::platform::{HostSystem, PlatformProfile};
    use crate::resolver::StaticHeaders;
    use crate::test_support::VendorTreeFixture;

    fn descriptor_for(system: &str) -> (crate::test_support::VendorTree, ExtensionDescriptor) {
        let tree = VendorTreeFixture::new().build();
        let builder = ExtensionBuilder::new(
            tree.root(),
            VendorLayout::default(),
            PlatformProfile::for_system(&HostSystem::new(system)),
        );
        let descriptor = builder
            .finalize(&StaticHeaders::new("numpy", tree.numpy_include()))
            .unwrap();
        (tree, descriptor)
    }

    #[test]
    fn test_gcc_flags() {
        let (tree, descriptor) = descriptor_for("Linux");
        let gcc = GccToolchain::new(PathBuf::from("gcc"), ToolchainFamily::Gcc);
        let renderer = FlagRenderer::new(&gcc, &descriptor, false).unwrap();

        let flags = renderer.compile_flags();
        assert_eq!(flags[0], "-std=c99");
        assert_eq!(flags[1], "-Ilib");
        assert_eq!(
            flags[2],
            format!("-I{}", Path::new("lib").join("subprojects").join("kastore").display())
        );
        assert_eq!(flags[3], format!("-I{}", tree.numpy_include().display()));
        assert_eq!(flags.last().map(String::as_str), Some("-UNDEBUG"));
        assert!(renderer.link_flags().is_empty());
    }

    #[test]
    fn test_msvc_flags_on_windows() {
        let (_tree, descriptor) = descriptor_for("Windows");
        let msvc = MsvcToolchain::new(PathBuf::from("cl.exe"));
        let renderer = FlagRenderer::new(&msvc, &descriptor, true).unwrap();

        assert_eq!(renderer.std_flag(), "/std:c11");
        let flags = renderer.compile_flags();
        assert!(flags.contains(&"/DWIN32".to_string()));
        assert!(flags.contains(&"/UNDEBUG".to_string()));
        assert_eq!(renderer.link_flags(), vec!["Advapi32.lib"]);
    }

    #[test]
    fn test_msvc_without_fallback_fails() {
        let (_tree, descriptor) = descriptor_for("Windows");
        let msvc = MsvcToolchain::new(PathBuf::from("cl.exe"));
        let err = FlagRenderer::new(&msvc, &descriptor, false).err().unwrap();
        assert!(matches!(err, ExtensionError::UnsupportedStandard { .. }));
    }

    #[test]
    fn test_compile_input_mirrors_source_under_object_dir() {
        let (_tree, descriptor) = descriptor_for("Linux");
        let gcc = GccToolchain::new(PathBuf::from("gcc"), ToolchainFamily::Gcc);
        let renderer = FlagRenderer::new(&gcc, &descriptor, true).unwrap();
        let object_dir = Path::new(OBJECT_DIR);

        let core = Path::new("lib").join("tskit").join("core.c");
        let input = renderer.compile_input(&core, object_dir);
        assert_eq!(input.source, core);
        assert_eq!(
            input.output,
            Path::new("build").join("lib").join("tskit").join("core.o")
        );
        assert_eq!(input.std_flag.as_deref(), Some("-std=c99"));

        let command = gcc.compile_command(&input);
        assert!(command.args.contains(&core.display().to_string()));
        assert!(command.args.contains(&input.output.display().to_string()));

        let module = renderer.compile_input(Path::new("_tskitmodule.c"), object_dir);
        assert_eq!(module.output, Path::new("build").join("_tskitmodule.o"));
    }
}
