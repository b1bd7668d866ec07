use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Arguments for the completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print bash completions:\n    nodefetch completions bash > ~/.local/share/bash-completion/completions/nodefetch\n\n\
                  Install zsh completions into a directory on $fpath:\n    nodefetch completions zsh --dir ~/.zfunc")]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,

    /// Write the completion file into this directory instead of stdout
    #[arg(long, short = 'd')]
    pub dir: Option<PathBuf>,
}
