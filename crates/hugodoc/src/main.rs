//! hugodoc CLI - API documentation for Hugo sites.
//!
//! Provides commands for:
//! - `render`: Render a documentation tree into markdown pages
//! - `presets`: List the built-in output styles

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::RenderArgs;
use output::Output;

/// hugodoc - Render API documentation trees into Hugo pages.
#[derive(Parser)]
#[command(name = "hugodoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a documentation tree into markdown pages.
    Render(RenderArgs),
    /// List the built-in output presets.
    Presets,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Presets => {
            commands::presets::execute();
            Ok(())
        }
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
