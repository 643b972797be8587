//! Check command implementation.
//!
//! Runs the full assembly without emitting anything.

use crate::cli::CheckArgs;
use crate::config;
use crate::error::Result;
use crate::ui;
use packwright_config::PipelineConfig;
use std::path::PathBuf;

/// Execute the check command.
///
/// Assembly errors are returned as-is. Entry modules that don't exist on disk
/// are only reported as warnings, since the build engine owns that failure.
pub fn execute(args: CheckArgs) -> Result<()> {
    let loaded = config::load(&args.load)?;
    ui::info(&format!(
        "Checking {} ({})",
        loaded.source.display(),
        loaded.mode
    ));

    let pipeline = loaded.assemble()?;
    ui::success("Configuration is valid!");

    for entry in missing_entries(&pipeline) {
        ui::warning(&format!("Entry module not found: {}", entry.display()));
    }

    for plugin in &pipeline.plugins {
        ui::info(&format!("  plugin {} ({:?})", plugin.name, plugin.applicability));
    }
    for rule in &pipeline.rules {
        let loaders: Vec<&str> = rule.stages.iter().map(|s| s.loader.as_str()).collect();
        ui::info(&format!("  rule {}: {}", rule.name, loaders.join(" -> ")));
    }

    Ok(())
}

/// Entry modules in the assembled configuration that aren't files on disk.
pub fn missing_entries(pipeline: &PipelineConfig) -> Vec<PathBuf> {
    pipeline
        .entry_module_paths
        .iter()
        .filter(|entry| !entry.is_file())
        .cloned()
        .collect()
}
