//! Packwright CLI - assemble asset pipeline configurations from the command line.
//!
//! The CLI loads declarations (defaults, `packwright.toml` or `package.json`,
//! `PACKWRIGHT_*` environment variables, then flags), hands them to
//! [`packwright_config::assemble`], and writes the resulting configuration as
//! JSON for the build engine.
//!
//! - [`error`] - CLI error types with actionable hints
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines on stderr
//! - `commands` - `build`, `check`, `resolve` and `init`
//! - `config` - layered declaration loading

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, LoadError, Result, ResultExt};
