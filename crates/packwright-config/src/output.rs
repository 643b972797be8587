//! Output locations and file naming.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ConfigError, Result};
use crate::mode::Mode;

/// Placeholder the build engine replaces with a content fingerprint.
pub const CONTENT_HASH: &str = "[contenthash]";

const FINGERPRINT_LEN: usize = 8;

/// When output names carry a [`CONTENT_HASH`] segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintPolicy {
    Never,
    #[default]
    Production,
    Always,
}

impl FingerprintPolicy {
    pub fn applies(self, mode: Mode) -> bool {
        match self {
            FingerprintPolicy::Never => false,
            FingerprintPolicy::Production => mode.is_production(),
            FingerprintPolicy::Always => true,
        }
    }
}

/// Naming templates. Tokens: `[name]`, `[ext]`, `[contenthash]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingRules {
    #[serde(default = "default_bundle_template")]
    pub bundle: String,

    #[serde(default = "default_asset_template")]
    pub asset: String,

    #[serde(default)]
    pub fingerprint: FingerprintPolicy,
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {
            bundle: default_bundle_template(),
            asset: default_asset_template(),
            fingerprint: FingerprintPolicy::default(),
        }
    }
}

fn default_bundle_template() -> String {
    "[name].js".to_string()
}

fn default_asset_template() -> String {
    "[name].css".to_string()
}

/// Where the compiled bundle and its derived assets go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPlan {
    pub root_directory: PathBuf,
    pub bundle_file_name: String,
    pub asset_naming_rule: String,
    pub fingerprinted: bool,
}

impl OutputPlan {
    pub fn bundle_path(&self) -> PathBuf {
        self.root_directory.join(&self.bundle_file_name)
    }

    /// Render the asset naming rule for one asset.
    pub fn asset_file_name(&self, name: &str, ext: &str) -> String {
        render(&self.asset_naming_rule, name, ext)
    }

    pub fn asset_path(&self, name: &str, ext: &str) -> PathBuf {
        self.root_directory.join(self.asset_file_name(name, ext))
    }

    /// Replace the [`CONTENT_HASH`] placeholder with the first eight hex
    /// digits of the SHA-256 of `content`.
    ///
    /// # Example
    ///
    /// ```
    /// use packwright_config::OutputPlan;
    ///
    /// let name = OutputPlan::fingerprint("index.[contenthash].js", b"console.log(1)");
    /// assert!(name.starts_with("index."));
    /// assert_eq!(name.len(), "index.12345678.js".len());
    /// ```
    pub fn fingerprint(file_name: &str, content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        let hash = format!("{:x}", hasher.finalize());
        file_name.replace(CONTENT_HASH, &hash[..FINGERPRINT_LEN])
    }
}

fn render(template: &str, name: &str, ext: &str) -> String {
    template.replace("[name]", name).replace("[ext]", ext)
}

/// Add or strip the content-hash segment of a template.
fn apply_fingerprint(template: &str, fingerprint: bool) -> String {
    let mut template = template.to_string();

    if fingerprint {
        if !template.contains(CONTENT_HASH) {
            // Only the file-name segment; directories may contain dots too
            let file_start = template.rfind('/').map_or(0, |i| i + 1);
            let insert_at = template[file_start..]
                .rfind('.')
                .map_or(template.len(), |i| file_start + i);
            template.insert_str(insert_at, &format!(".{CONTENT_HASH}"));
        }
        return template;
    }

    while let Some(idx) = template.find(CONTENT_HASH) {
        let start = match template[..idx].chars().last() {
            Some('.' | '-' | '_') => idx - 1,
            _ => idx,
        };
        template.replace_range(start..idx + CONTENT_HASH.len(), "");
    }
    template
}

/// Plan output locations for one build.
///
/// `root_dir` is made absolute against `cwd` when relative. The bundle name
/// comes from the bundle template applied to the entry's file stem.
///
/// # Errors
///
/// - [`ConfigError::InvalidValue`] for empty templates or an entry without
///   a file name
/// - [`ConfigError::OutputCollision`] when the asset rule renders the same
///   name as the bundle. Only the `css` rendering of the entry's stem is
///   checked; collisions for other asset extensions are not detected.
pub fn plan(
    mode: Mode,
    root_dir: &Path,
    cwd: &Path,
    entry: &Path,
    naming: &NamingRules,
) -> Result<OutputPlan> {
    if naming.bundle.trim().is_empty() || naming.asset.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "output.naming".to_string(),
            hint: "bundle and asset naming templates cannot be empty".to_string(),
        });
    }

    let stem = entry
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| ConfigError::InvalidValue {
            field: "entries".to_string(),
            hint: format!("entry '{}' has no file name", entry.display()),
        })?;

    let root_directory = if root_dir.is_absolute() {
        path_clean::clean(root_dir)
    } else {
        path_clean::clean(cwd.join(root_dir))
    };

    let fingerprinted = naming.fingerprint.applies(mode);
    let plan = OutputPlan {
        root_directory,
        bundle_file_name: render(&apply_fingerprint(&naming.bundle, fingerprinted), &stem, "js"),
        asset_naming_rule: apply_fingerprint(&naming.asset, fingerprinted),
        fingerprinted,
    };

    let asset = plan.asset_file_name(&stem, "css");
    if asset == plan.bundle_file_name {
        return Err(ConfigError::OutputCollision { name: asset });
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_for(mode: Mode, naming: &NamingRules) -> Result<OutputPlan> {
        plan(
            mode,
            Path::new("build"),
            Path::new("/work/app"),
            Path::new("./src/index.tsx"),
            naming,
        )
    }

    #[test]
    fn development_names_are_stable() {
        let plan = plan_for(Mode::Development, &NamingRules::default()).unwrap();
        assert_eq!(plan.root_directory, PathBuf::from("/work/app/build"));
        assert_eq!(plan.bundle_file_name, "index.js");
        assert_eq!(plan.asset_file_name("main", "css"), "main.css");
        assert!(!plan.fingerprinted);
    }

    #[test]
    fn production_names_carry_fingerprint() {
        let plan = plan_for(Mode::Production, &NamingRules::default()).unwrap();
        assert_eq!(plan.bundle_file_name, "index.[contenthash].js");
        assert_eq!(plan.asset_file_name("main", "css"), "main.[contenthash].css");
        assert!(plan.fingerprinted);
    }

    #[test]
    fn explicit_hash_segment_is_stripped_when_policy_does_not_apply() {
        let naming = NamingRules {
            bundle: "[name]-[contenthash].js".into(),
            ..NamingRules::default()
        };
        let dev = plan_for(Mode::Development, &naming).unwrap();
        assert_eq!(dev.bundle_file_name, "index.js");

        let prod = plan_for(Mode::Production, &naming).unwrap();
        assert_eq!(prod.bundle_file_name, "index-[contenthash].js");
    }

    #[test]
    fn policy_is_declared_not_hardcoded() {
        let never = NamingRules {
            fingerprint: FingerprintPolicy::Never,
            ..NamingRules::default()
        };
        assert_eq!(
            plan_for(Mode::Production, &never).unwrap().bundle_file_name,
            "index.js"
        );

        let always = NamingRules {
            fingerprint: FingerprintPolicy::Always,
            ..NamingRules::default()
        };
        assert_eq!(
            plan_for(Mode::Development, &always).unwrap().bundle_file_name,
            "index.[contenthash].js"
        );
    }

    #[test]
    fn absolute_root_ignores_cwd() {
        let plan = plan(
            Mode::Development,
            Path::new("/srv/out/../dist"),
            Path::new("/work"),
            Path::new("main.ts"),
            &NamingRules::default(),
        )
        .unwrap();
        assert_eq!(plan.root_directory, PathBuf::from("/srv/dist"));
        assert_eq!(plan.bundle_path(), PathBuf::from("/srv/dist/main.js"));
    }

    #[test]
    fn colliding_asset_rule_is_rejected() {
        let naming = NamingRules {
            bundle: "[name].out".into(),
            asset: "[name].out".into(),
            fingerprint: FingerprintPolicy::Never,
        };
        let err = plan_for(Mode::Development, &naming).unwrap_err();
        assert!(matches!(err, ConfigError::OutputCollision { name } if name == "index.out"));
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = OutputPlan::fingerprint("index.[contenthash].js", b"body");
        let b = OutputPlan::fingerprint("index.[contenthash].js", b"body");
        let c = OutputPlan::fingerprint("index.[contenthash].js", b"other");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.contains(CONTENT_HASH));
    }

    #[test]
    fn ext_token_is_rendered() {
        let naming = NamingRules {
            asset: "assets/[name].[ext]".into(),
            ..NamingRules::default()
        };
        let plan = plan_for(Mode::Production, &naming).unwrap();
        assert_eq!(plan.asset_naming_rule, "assets/[name].[contenthash].[ext]");
        assert_eq!(
            plan.asset_file_name("logo", "svg"),
            "assets/logo.[contenthash].svg"
        );
    }

    #[test]
    fn hash_goes_into_file_name_not_directory() {
        let naming = NamingRules {
            bundle: "static.v2/[name]".into(),
            asset: "static.v2/css/[name].css".into(),
            ..NamingRules::default()
        };
        let plan = plan_for(Mode::Production, &naming).unwrap();
        assert_eq!(plan.bundle_file_name, "static.v2/index.[contenthash]");
        assert_eq!(
            plan.asset_naming_rule,
            "static.v2/css/[name].[contenthash].css"
        );
    }
}
