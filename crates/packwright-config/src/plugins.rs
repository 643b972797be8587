//! Mode-dependent plugin composition.
//!
//! The always-active plugins keep their declared relative order. Exactly one
//! mode-exclusive plugin (a live-reload plugin in development, an extraction
//! plugin in production) is then placed at its declared [`Position`]. The
//! result is a new list; declarations are never mutated.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::mode::Mode;

/// Which builds a plugin takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Applicability {
    #[default]
    Always,
    DevelopmentOnly,
    ProductionOnly,
}

impl Applicability {
    pub fn is_exclusive(self) -> bool {
        self != Applicability::Always
    }

    /// True for the mode-exclusive applicability that belongs to `mode`.
    pub fn is_exclusive_to(self, mode: Mode) -> bool {
        matches!(
            (self, mode),
            (Applicability::DevelopmentOnly, Mode::Development)
                | (Applicability::ProductionOnly, Mode::Production)
        )
    }
}

/// Where a mode-exclusive plugin goes among the always-active ones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    First,
    #[default]
    Last,
    /// Directly after the named always-active plugin
    After(String),
}

/// A plugin declaration, and also an entry of the composed plugin list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,

    #[serde(default)]
    pub applicability: Applicability,

    /// Plugin-specific options forwarded to the build engine
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,

    /// Only meaningful for mode-exclusive plugins
    #[serde(default, skip_serializing_if = "is_last")]
    pub position: Position,
}

fn is_last(position: &Position) -> bool {
    *position == Position::Last
}

impl PluginSpec {
    pub fn always(name: impl Into<String>) -> Self {
        Self::new(name, Applicability::Always)
    }

    pub fn development_only(name: impl Into<String>) -> Self {
        Self::new(name, Applicability::DevelopmentOnly)
    }

    pub fn production_only(name: impl Into<String>) -> Self {
        Self::new(name, Applicability::ProductionOnly)
    }

    fn new(name: impl Into<String>, applicability: Applicability) -> Self {
        Self {
            name: name.into(),
            applicability,
            options: Value::Null,
            position: Position::Last,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// Compose the plugin list for `mode`.
///
/// # Errors
///
/// - [`ConfigError::PluginInvariant`] unless exactly one declared plugin is
///   exclusive to `mode`
/// - [`ConfigError::UnknownAnchor`] when that plugin is positioned after a
///   plugin that is not always active
/// - [`ConfigError::InvalidValue`] for a plugin with an empty name
///
/// # Example
///
/// ```
/// use packwright_config::{compose, Mode, PluginSpec};
///
/// let declared = [
///     PluginSpec::always("html"),
///     PluginSpec::development_only("react-refresh"),
///     PluginSpec::production_only("mini-css-extract"),
/// ];
/// let plugins = compose(Mode::Production, &declared).unwrap();
/// assert_eq!(plugins.len(), 2);
/// assert_eq!(plugins[1].name, "mini-css-extract");
/// ```
pub fn compose(mode: Mode, plugins: &[PluginSpec]) -> Result<Vec<PluginSpec>> {
    if plugins.iter().any(|p| p.name.trim().is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: "plugins.name".to_string(),
            hint: "every plugin needs a name".to_string(),
        });
    }

    let mut composed: Vec<PluginSpec> = plugins
        .iter()
        .filter(|p| !p.applicability.is_exclusive())
        .cloned()
        .collect();

    let candidates: Vec<&PluginSpec> = plugins
        .iter()
        .filter(|p| p.applicability.is_exclusive_to(mode))
        .collect();

    let [exclusive] = candidates.as_slice() else {
        return Err(ConfigError::PluginInvariant {
            mode,
            candidates: candidates.iter().map(|p| p.name.clone()).collect(),
        });
    };

    let index = match &exclusive.position {
        Position::First => 0,
        Position::Last => composed.len(),
        Position::After(anchor) => composed
            .iter()
            .position(|p| p.name == *anchor)
            .map(|i| i + 1)
            .ok_or_else(|| ConfigError::UnknownAnchor {
                plugin: exclusive.name.clone(),
                anchor: anchor.clone(),
            })?,
    };
    composed.insert(index, (*exclusive).clone());

    debug!(
        %mode,
        exclusive = %exclusive.name,
        total = composed.len(),
        "composed plugin list"
    );
    Ok(composed)
}
