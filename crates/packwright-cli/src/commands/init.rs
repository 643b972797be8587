//! Init command implementation.
//!
//! Writes a starter `packwright.toml` describing a React + TypeScript app.

use crate::cli::InitArgs;
use crate::commands::utils;
use crate::error::{LoadError, Result};
use crate::ui;
use packwright_config::{Declarations, CONFIG_FILE_NAME};
use std::path::PathBuf;

/// Execute the init command.
///
/// # Errors
///
/// Returns [`LoadError::AlreadyExists`] if the file is present and `--force`
/// wasn't given.
pub fn execute(args: InitArgs) -> Result<()> {
    let path = write_starter(&args)?;
    ui::success(&format!("Created {}", path.display()));
    ui::info("Next: packwright check, then packwright build --output pipeline.json");
    Ok(())
}

/// Write the starter declarations and return the file's path.
pub fn write_starter(args: &InitArgs) -> Result<PathBuf> {
    let cwd = utils::get_cwd(args.cwd.as_deref())?;
    let path = cwd.join(CONFIG_FILE_NAME);

    if path.exists() && !args.force {
        return Err(LoadError::AlreadyExists(path).into());
    }

    let contents = Declarations::react_app().to_toml_string()?;
    utils::write_output(&path, &contents)?;
    Ok(path)
}
