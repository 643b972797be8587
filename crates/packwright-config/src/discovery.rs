//! File-based declaration discovery for CLI use
//!
//! Library users should build [`Declarations`] directly or use
//! [`Declarations::from_value`].

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::declarations::Declarations;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE_NAME: &str = "packwright.toml";
const PACKAGE_JSON_FIELD: &str = "packwright";

/// Searches a project root for Packwright declarations.
///
/// # Example
///
/// ```no_run
/// use packwright_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let declarations = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. `packwright.toml`
    /// 2. `package.json` with a non-null `packwright` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE_NAME);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed = serde_json::from_str::<Value>(&content).ok()?;
        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<Declarations> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        load_file(&path)
    }
}

/// Load declarations from an explicit file (`.toml`, `.json`, or a
/// `package.json`).
pub fn load_file(path: &Path) -> Result<Declarations> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    debug!(path = %path.display(), "loading declarations");

    let content = fs::read_to_string(path)?;

    if path.file_name() == Some(OsStr::new("package.json")) {
        return from_package_json(&content);
    }

    match path.extension().and_then(OsStr::to_str) {
        Some("json") => {
            let value: Value =
                serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                    field: "json".to_string(),
                    hint: format!("Invalid JSON: {}", e),
                })?;
            Declarations::from_value(value)
        }
        _ => Declarations::from_toml_str(&content),
    }
}

fn from_package_json(content: &str) -> Result<Declarations> {
    let parsed: Value = serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: format!("Invalid JSON: {}", e),
    })?;

    match parsed.get(PACKAGE_JSON_FIELD) {
        Some(value) if !value.is_null() => Declarations::from_value(value.clone()),
        Some(_) => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: "The 'packwright' field cannot be null".to_string(),
        }),
        None => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: "Add a 'packwright' field to your package.json".to_string(),
        }),
    }
}
