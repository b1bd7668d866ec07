//! Version command implementation
//!
//! Besides the version, reports the defaults this invocation would run with, after
//! the configuration file has been applied.

use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::resolver::BATCH_THRESHOLD;

/// Run version command
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::discover(config_path)?;
    let history = HistoryStore::open_default()?;
    for line in report(&config, history.path())? {
        println!("{line}");
    }
    Ok(())
}

fn report(config: &Config, history: &Path) -> Result<Vec<String>> {
    Ok(vec![
        format!("nodefetch {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        "Defaults:".to_string(),
        format!("  Dialect: {}", config.dialect()?),
        format!(
            "  Batch size: {} (lists over {BATCH_THRESHOLD} items)",
            config.batch_size
        ),
        format!("  Confidence: {}", config.confidence),
        format!(
            "  Extra core nodes: {}, extra core prefixes: {}",
            config.core_nodes.len(),
            config.core_prefixes.len()
        ),
        format!("  History: {}", history.display()),
        String::new(),
        format!("Profile: {}", build_profile()),
    ])
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
