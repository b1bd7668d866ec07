//! Generate command implementation
//!
//! Validates the resource list, writes the install script and records the committed
//! resources in the history. Validation failures only stop generation with `--strict`
//! or when the reviewer declines at the prompt.

use std::path::{Path, PathBuf};

use console::Style;
use inquire::Confirm;
use tracing::{info, warn};

use super::helpers;
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::domain::EnrichedResource;
use crate::error::{NodefetchError, Result, fs};
use crate::history::HistoryStore;
use crate::installer::{self, Dialect};
use crate::resolver::validate_all;
use crate::ui;

/// Run generate command
pub fn run(config_path: Option<&Path>, args: GenerateArgs) -> Result<()> {
    let config = Config::discover(config_path)?;
    let resources = helpers::load_resources(&args.resources)?;
    let to_stdout = args.output.as_deref().is_some_and(helpers::is_stdout);

    let results = validate_all(&resources);
    let failed = results.iter().filter(|r| !r.is_valid).count();
    if failed > 0 {
        if to_stdout {
            eprintln!(
                "{} {failed} resource(s) failed validation",
                Style::new().yellow().bold().apply_to("Warning:")
            );
        } else {
            ui::print_validation(&results);
        }
        if args.strict || (!args.yes && !confirm_despite_failures(failed)?) {
            return Err(NodefetchError::ValidationBlocked { failed });
        }
        warn!(failed, "Generating despite validation failures");
    }

    let dialect = match args.dialect {
        Some(dialect) => dialect,
        None => config.dialect()?,
    };
    let script = installer::synthesize(&resources, dialect)?;
    let committed: Vec<EnrichedResource> = installer::installable(&resources).cloned().collect();

    if to_stdout {
        print!("{script}");
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(dialect.default_file_name()));
        helpers::write_file(&path, &script)?;
        if dialect == Dialect::Posix {
            make_executable(&path)?;
        }
        info!(path = %path.display(), %dialect, "Wrote install script");
        println!(
            "{} {} ({} resources)",
            Style::new().green().bold().apply_to("Wrote"),
            path.display(),
            committed.len()
        );
    }

    if !args.no_history {
        let added = HistoryStore::open_default()?.add(&committed)?;
        info!(added, "Updated download history");
    }
    Ok(())
}

/// Ask the reviewer; a session without a terminal cannot be asked and continues
fn confirm_despite_failures(failed: usize) -> Result<bool> {
    if !console::user_attended() {
        return Ok(true);
    }
    Ok(Confirm::new(&format!(
        "{failed} resource(s) failed validation. Generate the script anyway?"
    ))
    .with_default(false)
    .with_help_message("Failing resources are still written to the script")
    .prompt()?)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)
        .map_err(|e| fs::write_failed(path.display().to_string(), e.to_string()))?
        .permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    std::fs::set_permissions(path, permissions)
        .map_err(|e| fs::write_failed(path.display().to_string(), e.to_string()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
