//! tskit-build CLI - build configuration for the tskit Python extension

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tskit_build::util::diagnostic::emit;
use tskit_build::ExtensionError;

mod cli;
mod commands;

use cli::{Cli, Commands, GlobalArgs};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ExtensionError>() {
            Some(err) => emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging; stdout is reserved for command output
    let filter = if cli.verbose {
        EnvFilter::new("tskit_build=debug")
    } else {
        EnvFilter::new("tskit_build=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let global = GlobalArgs {
        root: cli.root,
        python: cli.python,
        numpy_include: cli.numpy_include,
        system: cli.system,
    };

    // Execute command
    match cli.command {
        Commands::Describe => commands::describe::execute(&global),
        Commands::Version => commands::version::execute(&global),
        Commands::Flags(args) => commands::flags::execute(&global, args),
        Commands::CompileCommands(args) => commands::compile_commands::execute(&global, args),
    }
}
