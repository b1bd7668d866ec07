//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - scan: Scan command arguments
//! - resolve: Resolve command arguments
//! - validate: Validate command arguments
//! - generate: Generate command arguments
//! - history: History command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod generate;
pub mod history;
pub mod resolve;
pub mod scan;
pub mod validate;

pub use completions::CompletionsArgs;
pub use generate::GenerateArgs;
pub use history::{HistoryArgs, HistorySubcommand};
pub use resolve::ResolveArgs;
pub use scan::ScanArgs;
pub use validate::ValidateArgs;

/// nodefetch - workflow dependency installer generator
///
/// Find the custom nodes and model files a workflow needs and write a script that installs them.
#[derive(Parser, Debug)]
#[command(
    name = "nodefetch",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Generate installer scripts for the custom nodes and models a workflow depends on",
    long_about = "nodefetch scans a node-graph workflow (UI export or API prompt), resolves every \
                  custom node and model file it references into an editable resource list, checks \
                  the download links and writes an idempotent install script for bash or Windows.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  nodefetch scan workflow.json                        \x1b[90m# List referenced nodes and models\x1b[0m\n   \
                  nodefetch resolve workflow.json -o resources.json   \x1b[90m# Build the editable resource list\x1b[0m\n   \
                  nodefetch validate resources.json                   \x1b[90m# Check download links\x1b[0m\n   \
                  nodefetch generate resources.json --dialect batch   \x1b[90m# Write install_resources.bat\x1b[0m\n   \
                  nodefetch history list                              \x1b[90m# Show committed downloads\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to NODEFETCH_CONFIG, then ./nodefetch.yaml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the custom nodes and model files a workflow references
    Scan(ScanArgs),

    /// Resolve a workflow into an editable resource list
    Resolve(ResolveArgs),

    /// Check the download links of a resource list
    Validate(ValidateArgs),

    /// Write an install script for a resource list
    Generate(GenerateArgs),

    /// Show or clear the download history
    History(HistoryArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
