//! Shared utilities for command implementations.

use crate::error::{CliError, Result, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a path relative to a working directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// The working directory for a command: `--cwd` if given, else the process's.
///
/// # Errors
///
/// Fails if an explicit directory doesn't exist or isn't a directory, or if
/// the process's current directory cannot be determined.
pub fn get_cwd(explicit: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })?;

    match explicit {
        None => Ok(current),
        Some(dir) => {
            let dir = resolve_path(dir, &current);
            if !dir.exists() {
                return Err(CliError::FileNotFound(dir));
            }
            if !dir.is_dir() {
                return Err(CliError::InvalidArgument(format!(
                    "--cwd is not a directory: {}",
                    dir.display()
                )));
            }
            Ok(dir)
        }
    }
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(path, contents).with_path(path)
}
