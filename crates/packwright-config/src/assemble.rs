//! Pipeline configuration assembly.
//!
//! [`assemble`] is the single entry point the build engine's caller uses: it
//! folds the mode's profiles into the declarations, checks every declaration
//! invariant, and returns one immutable [`PipelineConfig`]. Nothing here
//! touches the filesystem; relative paths are anchored lexically.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::declarations::Declarations;
use crate::dev::DevServerOptions;
use crate::error::{ConfigError, Result};
use crate::mode::Mode;
use crate::output::{self, OutputPlan};
use crate::plugins::{self, PluginSpec};
use crate::resolve::{self, AliasTable, CandidateProbe, SearchRoots};
use crate::rules::{self, Stage, TransformRule};

/// Everything the build engine needs for one build.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub mode: Mode,
    pub entry_module_paths: Vec<PathBuf>,
    /// Contractual order: rules pipe in this order
    pub rules: Vec<TransformRule>,
    /// Contractual order
    pub plugins: Vec<PluginSpec>,
    pub alias_table: AliasTable,
    pub search_root_list: SearchRoots,
    pub output_plan: OutputPlan,
    pub extensions: Vec<String>,
    pub dev_server: DevServerOptions,
}

impl PipelineConfig {
    pub fn rules_for(&self, path: &Path) -> Vec<&TransformRule> {
        rules::rules_for(path, &self.rules)
    }

    pub fn stages_for(&self, path: &Path) -> Vec<&Stage> {
        rules::stages_for(path, &self.rules)
    }

    /// Resolve a specifier against this config's alias table and search roots.
    pub fn resolve(
        &self,
        specifier: &str,
        context_dir: &Path,
        probe: &dyn CandidateProbe,
    ) -> Result<PathBuf> {
        resolve::resolve(
            specifier,
            context_dir,
            &self.alias_table,
            &self.search_root_list,
            probe,
        )
    }
}

/// Project root: `declarations.root` anchored on `cwd`, or `cwd` itself.
pub fn project_root(declarations: &Declarations, cwd: &Path) -> PathBuf {
    match &declarations.root {
        Some(root) => anchor(cwd, root),
        None => path_clean::clean(cwd),
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path_clean::clean(path)
    } else {
        path_clean::clean(base.join(path))
    }
}

/// Assemble the configuration for one build.
///
/// `cwd` is the invocation's working directory; it only anchors relative
/// paths. The bundle name is planned from the first entry.
///
/// # Errors
///
/// Any [`ConfigError`] other than loading errors. The first violated
/// invariant is reported; no declared rule or plugin is ever dropped.
///
/// # Example
///
/// ```
/// use packwright_config::{assemble, Declarations, Mode};
/// use std::path::Path;
///
/// let config = assemble(Mode::Production, &Declarations::react_app(), Path::new("/app")).unwrap();
/// assert_eq!(config.plugins.last().unwrap().name, "mini-css-extract-plugin");
/// assert_eq!(config.output_plan.root_directory, Path::new("/app/build"));
/// ```
pub fn assemble(mode: Mode, declarations: &Declarations, cwd: &Path) -> Result<PipelineConfig> {
    let declarations = declarations.materialize(mode)?;
    debug!(%mode, "materialized declarations");

    let root = project_root(&declarations, cwd);

    if declarations.entries.is_empty() {
        return Err(ConfigError::NoEntries);
    }
    if declarations
        .entries
        .iter()
        .any(|entry| entry.as_os_str().is_empty())
    {
        return Err(ConfigError::EmptyEntry);
    }
    let entry_module_paths: Vec<PathBuf> = declarations
        .entries
        .iter()
        .map(|entry| anchor(&root, entry))
        .collect();
    debug!(entries = entry_module_paths.len(), "validated entries");

    let alias_table = AliasTable::new(
        declarations
            .aliases
            .iter()
            .map(|alias| (alias.prefix.clone(), anchor(&root, &alias.path))),
    )?;
    debug!(aliases = alias_table.len(), "built alias table");

    let rules = declarations
        .rules
        .iter()
        .map(TransformRule::compile)
        .collect::<Result<Vec<_>>>()?;
    debug!(rules = rules.len(), "compiled transform rules");

    let plugins = plugins::compose(mode, &declarations.plugins)?;

    let search_root_list = SearchRoots::new(
        declarations
            .search_roots
            .iter()
            .map(|search_root| anchor(&root, search_root)),
    );
    debug!(roots = search_root_list.len(), "anchored search roots");

    let output_plan = output::plan(
        mode,
        &declarations.output.dir,
        &root,
        &entry_module_paths[0],
        &declarations.output.naming,
    )?;
    debug!(bundle = %output_plan.bundle_file_name, "planned outputs");

    if declarations.extensions.iter().any(|ext| ext.trim().is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: "extensions".to_string(),
            hint: "extensions cannot be empty strings".to_string(),
        });
    }

    let config = PipelineConfig {
        mode,
        entry_module_paths,
        rules,
        plugins,
        alias_table,
        search_root_list,
        output_plan,
        extensions: declarations.extensions,
        dev_server: declarations.dev_server,
    };

    info!(
        %mode,
        entries = config.entry_module_paths.len(),
        rules = config.rules.len(),
        plugins = config.plugins.len(),
        output = %config.output_plan.bundle_path().display(),
        "assembled pipeline config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::AliasDecl;
    use crate::error::ErrorKind;
    use crate::rules::{RuleDecl, StageDecl};
    use serde_json::json;

    fn minimal() -> Declarations {
        Declarations {
            entries: vec![PathBuf::from("src/index")],
            plugins: vec![
                PluginSpec::always("core"),
                PluginSpec::development_only("live-reload"),
                PluginSpec::production_only("extract"),
            ],
            ..Declarations::default()
        }
    }

    #[test]
    fn paths_are_anchored_on_project_root() {
        let decls = Declarations {
            root: Some(PathBuf::from("app")),
            aliases: vec![AliasDecl::new("@lib", "../shared/lib")],
            ..minimal()
        };
        let config = assemble(Mode::Development, &decls, Path::new("/work")).unwrap();
        assert_eq!(config.entry_module_paths, vec![PathBuf::from("/work/app/src/index")]);
        assert_eq!(
            config.alias_table.lookup("@lib/x"),
            Some(PathBuf::from("/work/shared/lib/x"))
        );
        assert_eq!(
            config.search_root_list.iter().collect::<Vec<_>>(),
            vec![Path::new("/work/app/node_modules")]
        );
        assert_eq!(config.output_plan.root_directory, PathBuf::from("/work/app/build"));
    }

    #[test]
    fn missing_entries_are_rejected() {
        let decls = Declarations {
            entries: Vec::new(),
            ..minimal()
        };
        let err = assemble(Mode::Development, &decls, Path::new("/w")).unwrap_err();
        assert!(matches!(err, ConfigError::NoEntries));
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let decls = Declarations {
            entries: vec![PathBuf::new()],
            ..minimal()
        };
        assert!(matches!(
            assemble(Mode::Development, &decls, Path::new("/w")),
            Err(ConfigError::EmptyEntry)
        ));
    }

    #[test]
    fn invalid_rule_fails_assembly() {
        let decls = Declarations {
            rules: vec![RuleDecl::glob("docs", "*.md")],
            ..minimal()
        };
        assert!(matches!(
            assemble(Mode::Production, &decls, Path::new("/w")),
            Err(ConfigError::EmptyRule(_))
        ));
    }

    #[test]
    fn profiles_reach_stage_options() {
        let config = assemble(Mode::Development, &Declarations::react_app(), Path::new("/app")).unwrap();
        let babel = config.stages_for(Path::new("/app/src/App.tsx"));
        assert_eq!(babel.len(), 1);
        assert_eq!(babel[0].options["plugins"], json!(["react-refresh/babel"]));
    }

    #[test]
    fn empty_extension_is_rejected() {
        let decls = Declarations {
            extensions: vec![".ts".into(), " ".into()],
            ..minimal()
        };
        assert!(matches!(
            assemble(Mode::Development, &decls, Path::new("/w")),
            Err(ConfigError::InvalidValue { field, .. }) if field == "extensions"
        ));
    }

    #[test]
    fn handoff_json_uses_camel_case() {
        let decls = Declarations {
            rules: vec![RuleDecl::glob("css", "*.css").stage(StageDecl::new("css-loader"))],
            ..minimal()
        };
        let config = assemble(Mode::Development, &decls, Path::new("/w")).unwrap();
        let value = serde_json::to_value(&config).unwrap();
        for key in [
            "mode",
            "entryModulePaths",
            "rules",
            "plugins",
            "aliasTable",
            "searchRootList",
            "outputPlan",
            "extensions",
            "devServer",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["outputPlan"]["bundleFileName"], json!("index.js"));
        assert_eq!(value["mode"], json!("development"));
    }
}
