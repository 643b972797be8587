//! Command-line interface definition for Packwright.
//!
//! # Command Structure
//!
//! - `packwright build` - Assemble the pipeline config and emit it as JSON
//! - `packwright check` - Assemble and report problems without emitting
//! - `packwright resolve` - Resolve one module specifier
//! - `packwright init` - Write a starter `packwright.toml`

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, Command, InitArgs, LoadArgs, ResolveArgs};
pub use enums::*;

/// Packwright - asset pipeline configuration engine
#[derive(Parser, Debug)]
#[command(
    name = "packwright",
    version,
    about = "Assemble asset pipeline configurations",
    long_about = "Packwright turns one declaration set into the configuration a bundler runs with:\n\
                  per-file transform chains, mode-dependent plugins, module resolution\n\
                  tables and output naming, for development or production builds."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
