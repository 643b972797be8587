use crate::cli::{LoadArgs, ModeArg};
use crate::commands::utils;
use crate::config::{LoadedConfig, ENV_PREFIX};
use crate::error::{LoadError, Result};
use figment::{
    providers::{Env, Format as _, Json, Serialized, Toml},
    Figment,
};
use packwright_config::{ConfigDiscovery, Declarations, Mode};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

const PACKAGE_JSON_FIELD: &str = "packwright";

/// `--mode` if given, else derived from `NODE_ENV`.
pub fn resolve_mode(arg: Option<ModeArg>, node_env: Option<&str>) -> Mode {
    arg.map(Mode::from)
        .unwrap_or_else(|| Mode::from_env_value(node_env))
}

/// The explicit `--config` file, or the discovered one.
pub fn locate_config(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    match explicit {
        Some(path) => {
            let path = utils::resolve_path(path, cwd);
            if !path.exists() {
                return Err(LoadError::NotFound(path).into());
            }
            Ok(path)
        }
        None => ConfigDiscovery::new(cwd)
            .find()
            .ok_or_else(|| LoadError::NoConfig(cwd.to_path_buf()).into()),
    }
}

fn file_provider(path: &Path) -> Figment {
    if path.file_name() == Some(OsStr::new("package.json")) {
        return Figment::from(Json::file(path)).focus(PACKAGE_JSON_FIELD);
    }
    match path.extension().and_then(OsStr::to_str) {
        Some("json") => Figment::from(Json::file(path)),
        _ => Figment::from(Toml::file(path)),
    }
}

/// Load declarations from every layer.
///
/// The config file's profile for the selected mode is applied to the file
/// layer only; `PACKWRIGHT_*` variables and flags still win over it.
///
/// Relative paths in the declarations are taken from the config file's
/// directory unless the file sets `root` itself.
pub fn load(args: &LoadArgs) -> Result<LoadedConfig> {
    let cwd = utils::get_cwd(args.cwd.as_deref())?;
    let mode = resolve_mode(args.mode, std::env::var("NODE_ENV").ok().as_deref());
    let source = locate_config(args.config.as_deref(), &cwd)?;
    debug!(%mode, config = %source.display(), "loading declarations");

    // Mode profiles are part of the file layer
    let from_file: Declarations = Figment::new()
        .merge(Serialized::defaults(Declarations::default()))
        .merge(file_provider(&source))
        .extract()
        .map_err(LoadError::from)?;
    let from_file = from_file.materialize(mode)?;

    let mut figment = Figment::new()
        .merge(Serialized::defaults(from_file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    // Paths given on the command line are relative to the working directory
    if !args.entries.is_empty() {
        let entries: Vec<PathBuf> = args
            .entries
            .iter()
            .map(|entry| utils::resolve_path(entry, &cwd))
            .collect();
        figment = figment.merge(Serialized::default("entries", entries));
    }
    if let Some(out_dir) = &args.out_dir {
        figment = figment.merge(Serialized::default(
            "output.dir",
            utils::resolve_path(out_dir, &cwd),
        ));
    }
    if let Some(port) = args.port {
        figment = figment.merge(Serialized::default("dev_server.port", port));
    }

    let mut declarations: Declarations = figment.extract().map_err(LoadError::from)?;
    if declarations.root.is_none() {
        declarations.root = source.parent().map(Path::to_path_buf);
    }

    Ok(LoadedConfig {
        mode,
        cwd,
        source,
        declarations,
    })
}
