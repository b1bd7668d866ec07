use clap::Parser;
use std::path::PathBuf;

/// Arguments for the resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve with the offline heuristics:\n    nodefetch resolve workflow.json -o resources.json\n\n\
                  Resolve with guesses produced elsewhere:\n    nodefetch resolve workflow.json --guesses guesses.json -o resources.json")]
pub struct ResolveArgs {
    /// Workflow JSON file (UI export or API prompt)
    pub workflow: PathBuf,

    /// JSON file with guesses keyed by raw name (or a list carrying rawName)
    #[arg(long, short = 'g')]
    pub guesses: Option<PathBuf>,

    /// Write the resource list here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}
