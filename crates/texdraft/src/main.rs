//! texdraft CLI - LaTeX draft generation.
//!
//! Provides commands for:
//! - `definitions`: Emit the `\addVAR` bindings document for a template
//! - `draft`: Render a template to its final text
//! - `update`: Refresh frozen placeholder values in a template
//! - `validate`: Check that frozen values still match computed ones

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DefinitionsArgs, DraftArgs, UpdateArgs, ValidateArgs};
use output::Output;

/// texdraft - LaTeX draft generation.
#[derive(Parser)]
#[command(name = "texdraft", version, about)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the definitions document binding each placeholder to its value.
    Definitions(DefinitionsArgs),
    /// Render a template to its final text.
    Draft(DraftArgs),
    /// Refresh frozen placeholder values in a template.
    Update(UpdateArgs),
    /// Check that frozen values still match freshly computed ones.
    Validate(ValidateArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Definitions(args) => args.execute(),
        Commands::Draft(args) => args.execute(),
        Commands::Update(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
