use clap::Parser;
use std::path::PathBuf;

use crate::installer::Dialect;

/// Arguments for the generate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Write install_resources.sh:\n    nodefetch generate resources.json\n\n\
                  Write a Windows batch file:\n    nodefetch generate resources.json --dialect batch\n\n\
                  Print the script without prompting:\n    nodefetch generate resources.json -o - --yes\n\n\
                  Stop when a download link fails validation:\n    nodefetch generate resources.json --strict")]
pub struct GenerateArgs {
    /// Resource list produced by `nodefetch resolve`
    pub resources: PathBuf,

    /// Script dialect: posix (sh) or batch (bat)
    #[arg(long, short = 'd')]
    pub dialect: Option<Dialect>,

    /// Output file, or `-` for stdout (defaults to install_resources.sh/.bat)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Generate even when some download links fail validation, without asking
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Refuse to generate when any download link fails validation
    #[arg(long, conflicts_with = "yes")]
    pub strict: bool,

    /// Do not record the resources in the download history
    #[arg(long)]
    pub no_history: bool,
}
