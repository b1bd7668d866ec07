use clap::Parser;
use std::path::PathBuf;

/// Arguments for the scan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List referenced nodes and models:\n    nodefetch scan workflow.json\n\n\
                  Print the items as JSON:\n    nodefetch scan workflow.json --json")]
pub struct ScanArgs {
    /// Workflow JSON file (UI export or API prompt)
    pub workflow: PathBuf,

    /// Print items as JSON
    #[arg(long)]
    pub json: bool,
}
