//! Command helper utilities

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::domain::{EnrichedResource, ScannedItem};
use crate::error::{NodefetchError, Result, fs};
use crate::scanner;

/// Read a whole text file
///
/// # Errors
///
/// Returns `NodefetchError::FileReadFailed` if the file cannot be read.
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| fs::read_failed(path.display().to_string(), e.to_string()))
}

/// Scan a workflow file; an empty result is an error here
///
/// # Errors
///
/// Returns `NodefetchError::FileReadFailed` or `NodefetchError::WorkflowParse` for an
/// unreadable document, and `NodefetchError::NoResources` when nothing is found.
pub fn scan_workflow(path: &Path, config: &Config) -> Result<Vec<ScannedItem>> {
    let document = read_file(path)?;
    let items = scanner::scan_with(&document, &config.core_policy())?;
    if items.is_empty() {
        return Err(NodefetchError::NoResources);
    }
    info!(path = %path.display(), count = items.len(), "Scanned workflow");
    Ok(items)
}

/// Load an edited resource list
///
/// Resource ids must be unique across the list.
///
/// # Errors
///
/// Returns `NodefetchError::FileReadFailed` if the file cannot be read, and
/// `NodefetchError::InvalidResourceList` if it is not a resource array or repeats an id.
pub fn load_resources(path: &Path) -> Result<Vec<EnrichedResource>> {
    let content = read_file(path)?;
    let invalid = |reason: String| NodefetchError::InvalidResourceList {
        path: path.display().to_string(),
        reason,
    };

    let resources: Vec<EnrichedResource> =
        serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;

    let mut ids = HashSet::new();
    if let Some(duplicate) = resources.iter().find(|r| !ids.insert(r.id())) {
        return Err(invalid(format!(
            "duplicate id {} ({})",
            duplicate.id(),
            duplicate.raw_name()
        )));
    }
    Ok(resources)
}

/// Write text to a file, creating parent directories as needed
///
/// # Errors
///
/// Returns `NodefetchError::FileWriteFailed` if the directory or file cannot be written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| fs::write_failed(parent.display().to_string(), e.to_string()))?;
    }
    std::fs::write(path, content)
        .map_err(|e| fs::write_failed(path.display().to_string(), e.to_string()))
}

/// `-` as an output path means stdout
pub fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}
