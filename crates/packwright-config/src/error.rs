//! Error types for declaration loading and pipeline assembly.

use std::path::PathBuf;

use thiserror::Error;

use crate::mode::Mode;
use crate::rules::ContentKind;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Every failure the configuration core can report.
///
/// All of these surface synchronously from [`crate::assemble`] (or from
/// loading), before anything is handed to the build engine.
#[derive(Debug, Error)]
pub enum ConfigError {
    // Resolution
    #[error("cannot resolve '{specifier}': no alias or search root provides it")]
    Resolution { specifier: String },

    // Rule chains
    #[error(
        "rule '{rule}': stage '{from}' produces {produces} but the next stage '{to}' expects {expects}"
    )]
    RuleCompatibility {
        rule: String,
        from: String,
        produces: ContentKind,
        to: String,
        expects: ContentKind,
    },

    #[error("rule '{rule}' has an invalid matcher: {message}")]
    InvalidMatcher { rule: String, message: String },

    #[error("rule '{0}' declares no stages")]
    EmptyRule(String),

    // Plugins
    #[error(
        "{mode} build needs exactly one mode-exclusive plugin, found {}: [{}]",
        .candidates.len(),
        .candidates.join(", ")
    )]
    PluginInvariant { mode: Mode, candidates: Vec<String> },

    #[error("plugin '{plugin}' is positioned after '{anchor}', which is not an always-active plugin")]
    UnknownAnchor { plugin: String, anchor: String },

    // Declaration-set invariants
    #[error("no entry modules specified")]
    NoEntries,

    #[error("entry module paths cannot be empty")]
    EmptyEntry,

    #[error("duplicate alias key '{0}'")]
    DuplicateAlias(String),

    #[error("alias keys cannot be empty")]
    EmptyAlias,

    #[error("asset naming rule renders '{name}', which collides with the bundle file name")]
    OutputCollision { name: String },

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    // Loading
    #[error("config not found")]
    NotFound,

    #[error("config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Resolution,
    RuleCompatibility,
    PluginInvariant,
    Configuration,
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::Resolution { .. } => ErrorKind::Resolution,
            ConfigError::RuleCompatibility { .. } => ErrorKind::RuleCompatibility,
            ConfigError::PluginInvariant { .. } | ConfigError::UnknownAnchor { .. } => {
                ErrorKind::PluginInvariant
            }
            _ => ErrorKind::Configuration,
        }
    }
}
