//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;
use packwright_config::{ConfigError, ErrorKind};

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert an assembly error, tagged with its category.
pub fn config_error_to_miette(err: ConfigError) -> Report {
    match err.kind() {
        ErrorKind::Resolution => miette::miette!(
            code = "packwright::resolution",
            help = "Check the alias table and search roots, or run 'packwright resolve'",
            "{}",
            err
        ),
        ErrorKind::RuleCompatibility => miette::miette!(
            code = "packwright::rule_compatibility",
            help = "Stages run in declared order; each stage must accept the previous stage's output",
            "{}",
            err
        ),
        ErrorKind::PluginInvariant => miette::miette!(
            code = "packwright::plugin_invariant",
            help = "Declare exactly one developmentOnly and one productionOnly plugin",
            "{}",
            err
        ),
        ErrorKind::Configuration => miette::miette!(
            code = "packwright::configuration",
            "Configuration error: {}",
            err
        ),
    }
}
