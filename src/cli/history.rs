use clap::{Parser, Subcommand};

/// Arguments for history command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show committed downloads:\n    nodefetch history list\n\n\
                  Clear the history:\n    nodefetch history clear")]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistorySubcommand,
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistorySubcommand {
    /// List recorded downloads, newest first
    List(ListHistoryArgs),

    /// Remove every recorded download
    Clear,
}

/// Arguments for history list command
#[derive(Parser, Debug)]
pub struct ListHistoryArgs {
    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}
