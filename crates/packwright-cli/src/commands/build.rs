//! Build command implementation.
//!
//! `packwright build` loads the declarations, assembles them for the
//! selected mode, and hands the result to the build engine as JSON.

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::config::{self, LoadedConfig};
use crate::error::Result;
use crate::ui;
use packwright_config::PipelineConfig;

/// Execute the build command.
///
/// # Process
///
/// 1. Load declarations (CLI > Env > File > Defaults)
/// 2. Assemble the pipeline configuration for the mode
/// 3. Write the JSON to `--output`, or to stdout
///
/// # Errors
///
/// Returns the first loading or assembly error; nothing is written in that
/// case.
pub fn execute(args: BuildArgs) -> Result<()> {
    let loaded = config::load(&args.load)?;
    ui::info(&format!(
        "Assembling {} configuration from {}",
        loaded.mode,
        loaded.source.display()
    ));

    let pipeline = loaded.assemble()?;
    let json = render(&pipeline, args.compact)?;

    match &args.output {
        Some(output) => {
            let path = utils::resolve_path(output, &loaded.cwd);
            utils::write_output(&path, &json)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
        None => {
            println!("{json}");
            ui::success(&summary(&loaded, &pipeline));
        }
    }

    Ok(())
}

/// Serialize the configuration for the build engine.
pub fn render(pipeline: &PipelineConfig, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(pipeline)?
    } else {
        serde_json::to_string_pretty(pipeline)?
    };
    Ok(json)
}

fn summary(loaded: &LoadedConfig, pipeline: &PipelineConfig) -> String {
    format!(
        "{} configuration: {} entries, {} rules, {} plugins -> {}",
        loaded.mode,
        pipeline.entry_module_paths.len(),
        pipeline.rules.len(),
        pipeline.plugins.len(),
        pipeline.output_plan.bundle_path().display()
    )
}
