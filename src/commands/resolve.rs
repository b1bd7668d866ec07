//! Resolve command implementation
//!
//! Scans a workflow, enriches the items batch by batch and writes the editable
//! resource list as JSON.

use std::path::Path;

use console::Style;
use tracing::info;

use super::helpers;
use crate::cli::ResolveArgs;
use crate::config::Config;
use crate::error::Result;
use crate::progress::BatchProgress;
use crate::resolver::{Enricher, GuessFileEnricher, HeuristicEnricher, Resolver};
use crate::ui;

/// Run resolve command
pub fn run(config_path: Option<&Path>, args: ResolveArgs) -> Result<()> {
    let config = Config::discover(config_path)?;
    let items = helpers::scan_workflow(&args.workflow, &config)?;

    let guesses;
    let enricher: &dyn Enricher = match &args.guesses {
        Some(path) => {
            guesses = GuessFileEnricher::from_path(path)?;
            info!(path = %path.display(), count = guesses.len(), "Using guesses file");
            &guesses
        }
        None => &HeuristicEnricher,
    };

    let resolver = Resolver::new(enricher)
        .with_batch_size(config.batch_size)
        .with_confidence(config.confidence);
    let batches = resolver.batch_count(items.len());
    let progress = if batches > 1 && console::Term::stderr().is_term() {
        BatchProgress::new(batches as u64)
    } else {
        BatchProgress::hidden()
    };

    let resolution = resolver.with_progress(&progress).resolve(&items).into_complete()?;
    ui::print_batch_failures(&resolution.failures);

    let json = serde_json::to_string_pretty(&resolution.resources)?;
    match &args.output {
        Some(path) if !helpers::is_stdout(path) => {
            helpers::write_file(path, &format!("{json}\n"))?;
            ui::print_resources(&resolution.resources);
            println!();
            let summary = format!(
                "Wrote {} resources to {}",
                resolution.resources.len(),
                path.display()
            );
            if resolution.is_partial() {
                println!("{} (partial)", Style::new().yellow().apply_to(summary));
            } else {
                println!("{}", Style::new().green().apply_to(summary));
            }
        }
        _ => println!("{json}"),
    }
    Ok(())
}
