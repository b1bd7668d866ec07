//! Validate command implementation

use super::helpers;
use crate::cli::ValidateArgs;
use crate::error::{NodefetchError, Result};
use crate::resolver::validate_all;
use crate::ui;

/// Run validate command
///
/// Validation is advisory: failures only make the command fail with `--strict`.
pub fn run(args: ValidateArgs) -> Result<()> {
    let resources = helpers::load_resources(&args.resources)?;
    let results = validate_all(&resources);
    ui::print_validation(&results);

    let failed = results.iter().filter(|r| !r.is_valid).count();
    if args.strict && failed > 0 {
        return Err(NodefetchError::ValidationBlocked { failed });
    }
    Ok(())
}
