//! Shell completions command

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::{Result, fs};

/// Print completions, or write them into `--dir` under the shell's conventional file name
pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    match args.dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .map_err(|e| fs::write_failed(dir.display().to_string(), e.to_string()))?;
            let path = clap_complete::generate_to(args.shell, &mut cmd, bin_name, &dir)
                .map_err(|e| fs::write_failed(dir.display().to_string(), e.to_string()))?;
            println!("Wrote {} completions to {}", args.shell, path.display());
        }
        None => {
            clap_complete::generate(args.shell, &mut cmd, bin_name, &mut std::io::stdout().lock());
        }
    }
    Ok(())
}
