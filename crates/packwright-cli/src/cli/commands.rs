use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::ModeArg;

/// Available Packwright subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble the pipeline configuration and write it as JSON
    ///
    /// The JSON goes to stdout unless --output is given; status lines go to
    /// stderr.
    Build(BuildArgs),

    /// Validate declarations without emitting anything
    ///
    /// Runs the full assembly and reports the first violated invariant, plus
    /// warnings for entry modules that do not exist on disk.
    Check(CheckArgs),

    /// Resolve a module specifier the way the build would
    ///
    /// Applies the alias table, then relative resolution, then the search
    /// roots, checking the filesystem with the configured extensions.
    Resolve(ResolveArgs),

    /// Write a starter packwright.toml for a React + TypeScript app
    Init(InitArgs),
}

/// Options shared by every command that loads declarations
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Build mode (defaults to NODE_ENV: "production" means production,
    /// anything else development)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Path to a config file (.toml, .json, or a package.json)
    ///
    /// If not provided, searches for packwright.toml, then a "packwright"
    /// field in package.json.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Entry modules, replacing the declared ones
    #[arg(short, long = "entry", value_name = "PATH")]
    pub entries: Vec<PathBuf>,

    /// Output directory, replacing the declared one
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Dev server port
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Working directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Write the JSON handoff to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub load: LoadArgs,
}

/// Arguments for the resolve command
#[derive(Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Specifier to resolve, e.g. "@pages/Home" or "react"
    #[arg(value_name = "SPECIFIER")]
    pub specifier: String,

    /// Importing file; relative specifiers are resolved from its directory
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,

    #[command(flatten)]
    pub load: LoadArgs,
}

/// Arguments for the init command
#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    /// Overwrite an existing packwright.toml
    #[arg(short, long)]
    pub force: bool,

    /// Directory to write into (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}
