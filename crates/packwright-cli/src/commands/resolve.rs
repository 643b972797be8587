//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::commands::utils;
use crate::config;
use crate::error::Result;
use crate::ui;
use packwright_config::{project_root, FsProbe};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Execute the resolve command.
///
/// Prints the resolved path on stdout so it can be piped.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let resolved = resolve(&args)?;
    println!("{}", resolved.display());
    ui::success(&format!("{} -> {}", args.specifier, resolved.display()));
    Ok(())
}

/// Resolve `args.specifier` against the assembled configuration, checking
/// candidates on disk with the configured extensions.
pub fn resolve(args: &ResolveArgs) -> Result<PathBuf> {
    let loaded = config::load(&args.load)?;
    let pipeline = loaded.assemble()?;

    let root = project_root(&loaded.declarations, &loaded.cwd);
    let context_dir = context_dir(args.from.as_deref(), &root);
    debug!(specifier = %args.specifier, context = %context_dir.display(), "resolving");

    let probe = FsProbe::new(pipeline.extensions.clone());
    Ok(pipeline.resolve(&args.specifier, &context_dir, &probe)?)
}

/// Directory relative specifiers are resolved from: the importing file's
/// directory, or the project root.
fn context_dir(from: Option<&Path>, root: &Path) -> PathBuf {
    from.map(|file| utils::resolve_path(file, root))
        .and_then(|file| file.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| root.to_path_buf())
}
