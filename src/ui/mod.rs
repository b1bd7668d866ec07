//! Terminal presentation
//!
//! Plain `println!` output styled with `console`: scanned items, resource tables,
//! validation reports and the download history.

use console::Style;

use crate::domain::{EnrichedResource, HistoryItem, ScannedItem};
use crate::resolver::{BatchFailure, ValidationResult};

fn kind_label(is_node: bool) -> &'static str {
    if is_node { "node" } else { "file" }
}

/// Scanned items, one per line
pub fn print_items(items: &[ScannedItem]) {
    println!(
        "{} ({}):",
        Style::new().bold().apply_to("Resources found"),
        items.len()
    );
    for item in items {
        let kind = kind_label(item.is_node());
        let kind = if item.is_node() {
            Style::new().cyan().apply_to(kind)
        } else {
            Style::new().yellow().apply_to(kind)
        };
        println!("  [{kind}] {}", item.raw_name());
    }
}

/// Resolved resources with their classification
pub fn print_resources(resources: &[EnrichedResource]) {
    for resource in resources {
        println!(
            "  {} {}",
            Style::new().bold().yellow().apply_to(&resource.name),
            Style::new().dim().apply_to(format!(
                "({}, {}, {})",
                resource.resource_type,
                resource.compute_type(),
                resource.file_size
            ))
        );
        if !resource.description.is_empty() {
            println!("    {}", resource.description);
        }
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Target:"),
            resource.effective_target_path()
        );
        let url = if resource.download_url.trim().is_empty() {
            Style::new().dim().apply_to("(none)".to_string())
        } else {
            Style::new().apply_to(resource.download_url.clone())
        };
        println!("    {} {}", Style::new().bold().apply_to("URL:"), url);
    }
}

/// PASS/FAIL line per resource, then a summary
pub fn print_validation(results: &[ValidationResult<'_>]) {
    for result in results {
        let name = result.resource.raw_name();
        match result.reason {
            None => println!("  {} {name}", Style::new().green().bold().apply_to("PASS")),
            Some(reason) => println!(
                "  {} {name}: {}",
                Style::new().red().bold().apply_to("FAIL"),
                Style::new().dim().apply_to(reason)
            ),
        }
    }

    let failed = results.iter().filter(|r| !r.is_valid).count();
    println!();
    if failed == 0 {
        println!(
            "{}",
            Style::new()
                .green()
                .apply_to(format!("All {} download URLs look usable", results.len()))
        );
    } else {
        println!(
            "{}",
            Style::new().yellow().apply_to(format!(
                "{failed} of {} download URLs need attention",
                results.len()
            ))
        );
    }
}

/// Failed enrichment batches, on stderr
pub fn print_batch_failures(failures: &[BatchFailure]) {
    for failure in failures {
        eprintln!(
            "{} batch {} ({} items dropped): {}",
            Style::new().yellow().bold().apply_to("Warning:"),
            failure.batch + 1,
            failure.raw_names.len(),
            failure.error
        );
    }
}

/// History entries, newest first
pub fn print_history(items: &[HistoryItem]) {
    if items.is_empty() {
        println!("No downloads recorded.");
        return;
    }
    println!("Download history ({}):", items.len());
    for item in items {
        println!(
            "  {} {} {}",
            Style::new()
                .dim()
                .apply_to(item.date_added.format("%Y-%m-%d %H:%M")),
            Style::new().bold().apply_to(&item.resource.name),
            Style::new()
                .dim()
                .apply_to(format!("({})", item.resource.resource_type))
        );
        println!("    {}", item.download_url());
    }
}
