//! compile_commands.json emission for IDE integration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::flags::{FlagRenderer, OBJECT_DIR};

/// File name clang tooling looks for.
pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

/// compile_commands.json entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileCommand {
    pub directory: String,
    pub file: String,
    pub arguments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// One entry per manifest source. Paths stay relative to `root`, which is
/// recorded as the working directory of every entry.
pub fn compile_commands(renderer: &FlagRenderer<'_>, root: &Path) -> Vec<CompileCommand> {
    let object_dir = Path::new(OBJECT_DIR);
    let directory = root.display().to_string();

    renderer
        .descriptor()
        .sources()
        .paths()
        .map(|source| {
            let input = renderer.compile_input(source, object_dir);
            let spec = renderer.toolchain().compile_command(&input);

            let mut arguments = Vec::with_capacity(spec.args.len() + 1);
            arguments.push(spec.program.display().to_string());
            arguments.extend(spec.args);

            CompileCommand {
                directory: directory.clone(),
                file: source.display().to_string(),
                arguments,
                output: Some(input.output.display().to_string()),
            }
        })
        .collect()
}

/// Write `commands` to `path` as pretty-printed JSON.
pub fn emit_compile_commands(commands: &[CompileCommand], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(commands)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!("Wrote {} entries to {}", commands.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::builder::toolchain::{GccToolchain, ToolchainFamily};
    use crate::core::descriptor::ExtensionBuilder;
    use crate::core::manifest::VendorLayout;
    use crate::core::platform::{HostSystem, PlatformProfile};
    use crate::resolver::StaticHeaders;
    use crate::test_support::VendorTreeFixture;

    #[test]
    fn test_compile_command_serialization() {
        let cmd = CompileCommand {
            directory: "/src/tskit/python".to_string(),
            file: "_tskitmodule.c".to_string(),
            arguments: vec!["cc".to_string(), "-c".to_string(), "_tskitmodule.c".to_string()],
            output: Some("build/_tskitmodule.o".to_string()),
        };

        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("directory"));
        assert!(json.contains("arguments"));
    }

    #[test]
    fn test_compile_command_without_output() {
        let cmd = CompileCommand {
            directory: "/project".to_string(),
            file: "lib/tskit/core.c".to_string(),
            arguments: vec!["gcc".to_string(), "-c".to_string()],
            output: None,
        };

        let json = serde_json::to_string(&cmd).unwrap();
        assert!(!json.contains("output"));
    }

    #[test]
    fn test_emit_for_descriptor() {
        let tree = VendorTreeFixture::new().build();
        let descriptor = ExtensionBuilder::new(
            tree.root(),
            VendorLayout::default(),
            PlatformProfile::for_system(&HostSystem::new("Linux")),
        )
        .finalize(&StaticHeaders::new("numpy", tree.numpy_include()))
        .unwrap();

        let gcc = GccToolchain::new(PathBuf::from("gcc"), ToolchainFamily::Gcc);
        let renderer = FlagRenderer::new(&gcc, &descriptor, true).unwrap();
        let commands = compile_commands(&renderer, tree.root());

        assert_eq!(commands.len(), 9);
        assert_eq!(commands[0].file, "_tskitmodule.c");
        assert_eq!(commands[0].arguments[0], "gcc");
        let kastore = Path::new("lib").join("subprojects").join("kastore");
        assert_eq!(commands[8].file, kastore.join("kastore.c").display().to_string());
        assert_eq!(
            commands[8].output,
            Some(Path::new("build").join(&kastore).join("kastore.o").display().to_string())
        );

        let path = tree.root().join(COMPILE_COMMANDS_FILE);
        emit_compile_commands(&commands, &path).unwrap();
        let written: Vec<CompileCommand> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, commands);
    }
}
