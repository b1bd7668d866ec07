//! Scan command implementation
//!
//! Lists the custom node types and model files a workflow references.

use std::path::Path;

use super::helpers;
use crate::cli::ScanArgs;
use crate::config::Config;
use crate::error::Result;
use crate::ui;

/// Run scan command
pub fn run(config_path: Option<&Path>, args: ScanArgs) -> Result<()> {
    let config = Config::discover(config_path)?;
    let items = helpers::scan_workflow(&args.workflow, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        ui::print_items(&items);
    }
    Ok(())
}
