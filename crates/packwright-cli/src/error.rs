//! Error handling for the Packwright CLI.
//!
//! - [`CliError`] is what every command returns
//! - [`LoadError`] covers declaration loading and project setup, with hints
//! - assembly failures arrive as [`packwright_config::ConfigError`]
//!
//! # Example
//!
//! ```rust,no_run
//! use packwright_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod miette;

use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Assembly rejected the declarations
    #[error("Configuration error: {0}")]
    Config(#[from] packwright_config::ConfigError),

    /// Declarations could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Handoff serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Declaration loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Explicit `--config` path doesn't exist
    #[error("Config file not found: {}\n\nHint: Check the --config path or run 'packwright init'", .0.display())]
    NotFound(PathBuf),

    /// No config anywhere and no entries on the command line
    #[error("No packwright.toml or package.json 'packwright' field found in {}\n\nHint: Run 'packwright init' or pass --entry <PATH>", .0.display())]
    NoConfig(PathBuf),

    /// Layered extraction failed (bad syntax, wrong type, bad env value)
    #[error("Invalid configuration: {message}\n\nHint: Check packwright.toml syntax and PACKWRIGHT_* environment variables")]
    Invalid { message: String },

    /// `init` would overwrite an existing file
    #[error("{} already exists\n\nHint: Pass --force to overwrite it", .0.display())]
    AlreadyExists(PathBuf),
}

impl From<figment::Error> for LoadError {
    fn from(err: figment::Error) -> Self {
        LoadError::Invalid {
            message: err.to_string(),
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for attaching a path to I/O failures.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}
