use clap::Parser;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Check download links:\n    nodefetch validate resources.json\n\n\
                  Fail when any link is unusable:\n    nodefetch validate resources.json --strict")]
pub struct ValidateArgs {
    /// Resource list produced by `nodefetch resolve`
    pub resources: PathBuf,

    /// Exit with an error when any resource fails validation
    #[arg(long)]
    pub strict: bool,
}
