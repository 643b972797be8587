//! The static declaration set a build is assembled from.
//!
//! Declarations are plain serde data: they come from `packwright.toml`, the
//! `packwright` field of `package.json`, or code. Per-mode variation lives in
//! `profiles`, keyed by mode name, and is folded in by
//! [`Declarations::materialize`] before assembly.

mod merge;
mod preset;

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dev::DevServerOptions;
use crate::error::{ConfigError, Result};
use crate::mode::Mode;
use crate::output::NamingRules;
use crate::plugins::PluginSpec;
use crate::rules::{RuleDecl, StageDecl};

pub(crate) use merge::merge_values;

/// One declared alias. Relative paths are taken from the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDecl {
    pub prefix: String,
    pub path: PathBuf,
}

impl AliasDecl {
    pub fn new(prefix: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDecl {
    #[serde(default = "default_out_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub naming: NamingRules,
}

impl Default for OutputDecl {
    fn default() -> Self {
        Self {
            dir: default_out_dir(),
            naming: NamingRules::default(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("build")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declarations {
    /// Project root; relative values are joined onto the working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub entries: Vec<PathBuf>,

    #[serde(default)]
    pub rules: Vec<RuleDecl>,

    #[serde(default)]
    pub plugins: Vec<PluginSpec>,

    #[serde(default)]
    pub aliases: Vec<AliasDecl>,

    #[serde(default = "default_search_roots")]
    pub search_roots: Vec<PathBuf>,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub output: OutputDecl,

    #[serde(default)]
    pub dev_server: DevServerOptions,

    /// Overrides deep-merged over the whole set, keyed by mode name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub profiles: IndexMap<String, Value>,
}

impl Default for Declarations {
    fn default() -> Self {
        Self {
            root: None,
            entries: Vec::new(),
            rules: Vec::new(),
            plugins: Vec::new(),
            aliases: Vec::new(),
            search_roots: default_search_roots(),
            extensions: default_extensions(),
            output: OutputDecl::default(),
            dev_server: DevServerOptions::default(),
            profiles: IndexMap::new(),
        }
    }
}

fn default_search_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("node_modules")]
}

pub(crate) fn default_extensions() -> Vec<String> {
    [".ts", ".tsx", ".js", ".jsx", ".scss", ".css"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Declarations {
    /// Create from a `serde_json::Value`, e.g. a config loaded elsewhere.
    ///
    /// # Example
    ///
    /// ```
    /// use packwright_config::Declarations;
    /// use serde_json::json;
    /// use std::path::PathBuf;
    ///
    /// let decls = Declarations::from_value(json!({ "entries": ["src/main.ts"] })).unwrap();
    /// assert_eq!(decls.entries, vec![PathBuf::from("src/main.ts")]);
    /// assert_eq!(decls.dev_server.port, 3000);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: e.to_string(),
        })
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: e.to_string(),
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let toml_val: toml::Value = toml::from_str(content).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: format!("Invalid TOML syntax: {}", e),
        })?;

        let value = serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: format!("TOML to JSON conversion failed: {}", e),
        })?;

        Self::from_value(value)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: e.to_string(),
        })
    }

    /// Fold the `mode` profile into the set, then each stage's `mode`
    /// profile into that stage's options.
    ///
    /// The result carries no profiles, so materializing it again is a no-op.
    /// Profile keys may be any spelling [`Mode`] parses (`dev`, `production`,
    /// ...); anything else is rejected.
    pub fn materialize(&self, mode: Mode) -> Result<Self> {
        let mut materialized = match profile_for(&self.profiles, mode)? {
            Some(overrides) => {
                let mut base = serde_json::to_value(self).map_err(invalid_override)?;
                merge_values(&mut base, overrides);
                serde_json::from_value(base).map_err(invalid_override)?
            }
            None => self.clone(),
        };
        materialized.profiles.clear();

        for rule in &mut materialized.rules {
            for stage in &mut rule.stages {
                materialize_stage(stage, mode)?;
            }
        }

        Ok(materialized)
    }
}

fn materialize_stage(stage: &mut StageDecl, mode: Mode) -> Result<()> {
    if let Some(overrides) = profile_for(&stage.profiles, mode)? {
        let overrides = overrides.clone();
        merge_values(&mut stage.options, &overrides);
    }
    stage.profiles.clear();
    Ok(())
}

fn profile_for(profiles: &IndexMap<String, Value>, mode: Mode) -> Result<Option<&Value>> {
    let mut found = None;
    for (key, value) in profiles {
        let profile_mode: Mode = key.parse().map_err(|_| ConfigError::InvalidProfileOverride {
            message: format!("unknown profile '{}', expected development or production", key),
        })?;
        if profile_mode == mode && !value.is_null() {
            found = Some(value);
        }
    }
    Ok(found)
}

fn invalid_override(err: serde_json::Error) -> ConfigError {
    ConfigError::InvalidProfileOverride {
        message: err.to_string(),
    }
}
