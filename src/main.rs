//! nodefetch - workflow dependency installer generator
//!
//! Turns a node-graph workflow file into an install script for the custom nodes and
//! model files it references.

use clap::Parser;

use nodefetch::cli::{Cli, Commands};
use nodefetch::{commands, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Scan(args) => commands::scan::run(config, args),
        Commands::Resolve(args) => commands::resolve::run(config, args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Generate(args) => commands::generate::run(config, args),
        Commands::History(args) => commands::history::run(args),
        Commands::Version => commands::version::run(config),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
