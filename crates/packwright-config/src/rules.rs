//! Transform rules and per-file dispatch.
//!
//! A [`TransformRule`] pairs a [`Matcher`] with an ordered list of
//! [`Stage`]s. Every rule whose matcher accepts a file applies, in
//! declaration order, each consuming the previous rule's output. Stages inside
//! one rule run in the order they are declared, so each stage's output kind
//! must be accepted by the next stage; that is checked once, when the rule is
//! compiled.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Representation of a file's content between stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    /// Accepts or produces anything; never causes a mismatch.
    Any,
    RawText,
    Html,
    Script,
    Sass,
    Css,
    /// CSS translated into a JS module exporting class names.
    CssModule,
    JsModule,
}

impl ContentKind {
    pub fn feeds(self, next: ContentKind) -> bool {
        self == ContentKind::Any || next == ContentKind::Any || self == next
    }

    fn as_str(self) -> &'static str {
        match self {
            ContentKind::Any => "any",
            ContentKind::RawText => "rawText",
            ContentKind::Html => "html",
            ContentKind::Script => "script",
            ContentKind::Sass => "sass",
            ContentKind::Css => "css",
            ContentKind::CssModule => "cssModule",
            ContentKind::JsModule => "jsModule",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input and output kinds of the loaders we know about.
fn known_loader_kinds(loader: &str) -> Option<(ContentKind, ContentKind)> {
    use ContentKind::*;

    let kinds = match loader {
        "sass-loader" => (Sass, Css),
        "postcss-loader" => (Css, Css),
        "css-loader" => (Css, CssModule),
        "style-loader" => (CssModule, JsModule),
        "babel-loader" => (Script, JsModule),
        "html-loader" => (Html, JsModule),
        "raw-loader" => (RawText, JsModule),
        _ => return None,
    };
    Some(kinds)
}

/// A declared stage, before mode materialization and kind inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDecl {
    pub loader: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<ContentKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<ContentKind>,

    /// Per-mode overrides merged into `options` (keyed by mode name)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub profiles: IndexMap<String, Value>,
}

impl StageDecl {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: Value::Null,
            input: None,
            output: None,
            profiles: IndexMap::new(),
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    pub fn with_kinds(mut self, input: ContentKind, output: ContentKind) -> Self {
        self.input = Some(input);
        self.output = Some(output);
        self
    }

    pub fn with_profile(mut self, mode: impl Into<String>, overrides: Value) -> Self {
        self.profiles.insert(mode.into(), overrides);
        self
    }
}

/// A declared rule. Exactly one of `test`, `extensions` or `glob` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDecl {
    pub name: String,

    /// Regular expression over the file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,

    #[serde(default)]
    pub case_insensitive: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// File-name glob such as `*.css`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glob: Option<String>,

    /// Regular expression; matching paths are never handled by this rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    #[serde(rename = "use")]
    pub stages: Vec<StageDecl>,
}

impl RuleDecl {
    pub fn test(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            test: Some(pattern.into()),
            ..Self::empty(name)
        }
    }

    pub fn glob(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            glob: Some(pattern.into()),
            ..Self::empty(name)
        }
    }

    pub fn extensions<I, S>(name: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: Some(extensions.into_iter().map(Into::into).collect()),
            ..Self::empty(name)
        }
    }

    fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            test: None,
            case_insensitive: false,
            extensions: None,
            glob: None,
            exclude: None,
            stages: Vec::new(),
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    pub fn stage(mut self, stage: StageDecl) -> Self {
        self.stages.push(stage);
        self
    }
}

/// Compiled file predicate.
#[derive(Debug, Clone)]
pub enum Matcher {
    Test {
        regex: Regex,
        case_insensitive: bool,
    },
    Extensions(Vec<String>),
    Glob(glob::Pattern),
}

impl Matcher {
    fn compile(decl: &RuleDecl) -> Result<Self> {
        let invalid = |message: String| ConfigError::InvalidMatcher {
            rule: decl.name.clone(),
            message,
        };

        match (&decl.test, &decl.extensions, &decl.glob) {
            (Some(pattern), None, None) => Ok(Matcher::Test {
                regex: compile_regex(pattern, decl.case_insensitive).map_err(invalid)?,
                case_insensitive: decl.case_insensitive,
            }),
            (None, Some(extensions), None) => {
                if extensions.is_empty() {
                    return Err(invalid("extension list is empty".to_string()));
                }
                Ok(Matcher::Extensions(
                    extensions
                        .iter()
                        .map(|e| e.trim_start_matches('.').to_lowercase())
                        .collect(),
                ))
            }
            (None, None, Some(pattern)) => glob::Pattern::new(pattern)
                .map(Matcher::Glob)
                .map_err(|e| invalid(e.to_string())),
            _ => Err(invalid(
                "exactly one of 'test', 'extensions' or 'glob' must be set".to_string(),
            )),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Matcher::Test { regex, .. } => regex.is_match(&path.to_string_lossy()),
            Matcher::Extensions(extensions) => path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| extensions.iter().any(|e| *e == ext)),
            Matcher::Glob(pattern) => {
                if pattern.as_str().contains('/') {
                    pattern.matches_path(path)
                } else {
                    path.file_name()
                        .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
                }
            }
        }
    }
}

fn compile_regex(pattern: &str, case_insensitive: bool) -> std::result::Result<Regex, String> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| e.to_string())
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Matcher::Test {
                    regex: a,
                    case_insensitive: ai,
                },
                Matcher::Test {
                    regex: b,
                    case_insensitive: bi,
                },
            ) => a.as_str() == b.as_str() && ai == bi,
            (Matcher::Extensions(a), Matcher::Extensions(b)) => a == b,
            (Matcher::Glob(a), Matcher::Glob(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Serialize for Matcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Matcher::Test {
                regex,
                case_insensitive,
            } => {
                map.serialize_entry("test", regex.as_str())?;
                if *case_insensitive {
                    map.serialize_entry("caseInsensitive", &true)?;
                }
            }
            Matcher::Extensions(extensions) => map.serialize_entry("extensions", extensions)?,
            Matcher::Glob(pattern) => map.serialize_entry("glob", pattern.as_str())?,
        }
        map.end()
    }
}

/// A stage with its content kinds settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub loader: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
    pub input: ContentKind,
    pub output: ContentKind,
}

impl Stage {
    fn from_decl(decl: &StageDecl) -> Self {
        let (known_input, known_output) =
            known_loader_kinds(&decl.loader).unwrap_or((ContentKind::Any, ContentKind::Any));
        Self {
            loader: decl.loader.clone(),
            options: decl.options.clone(),
            input: decl.input.unwrap_or(known_input),
            output: decl.output.unwrap_or(known_output),
        }
    }
}

/// A compiled, checked rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRule {
    pub name: String,
    pub matcher: Matcher,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<ExcludePattern>,
    pub stages: Vec<Stage>,
}

/// Path expression that removes files from a rule.
#[derive(Debug, Clone)]
pub struct ExcludePattern(Regex);

impl ExcludePattern {
    pub fn is_match(&self, path: &Path) -> bool {
        self.0.is_match(&path.to_string_lossy())
    }
}

impl PartialEq for ExcludePattern {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

impl Serialize for ExcludePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl TransformRule {
    /// Compile a declaration and check that its stages chain.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidMatcher`] for a bad or ambiguous matcher
    /// - [`ConfigError::EmptyRule`] when no stages are declared
    /// - [`ConfigError::RuleCompatibility`] when adjacent stages disagree
    pub fn compile(decl: &RuleDecl) -> Result<Self> {
        let matcher = Matcher::compile(decl)?;
        let exclude = decl
            .exclude
            .as_deref()
            .map(|pattern| compile_regex(pattern, decl.case_insensitive).map(ExcludePattern))
            .transpose()
            .map_err(|message| ConfigError::InvalidMatcher {
                rule: decl.name.clone(),
                message,
            })?;

        if decl.stages.is_empty() {
            return Err(ConfigError::EmptyRule(decl.name.clone()));
        }

        let rule = Self {
            name: decl.name.clone(),
            matcher,
            exclude,
            stages: decl.stages.iter().map(Stage::from_decl).collect(),
        };
        rule.check_chain()?;
        debug!(rule = %rule.name, stages = rule.stages.len(), "compiled transform rule");
        Ok(rule)
    }

    fn check_chain(&self) -> Result<()> {
        for pair in self.stages.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            if !from.output.feeds(to.input) {
                return Err(ConfigError::RuleCompatibility {
                    rule: self.name.clone(),
                    from: from.loader.clone(),
                    produces: from.output,
                    to: to.loader.clone(),
                    expects: to.input,
                });
            }
        }
        Ok(())
    }

    pub fn matches(&self, path: &Path) -> bool {
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(path) {
                return false;
            }
        }
        self.matcher.matches(path)
    }
}

/// Rules that apply to `path`, in declaration order. Empty when none match;
/// the build engine then applies its own default handling.
pub fn rules_for<'a>(path: &Path, rules: &'a [TransformRule]) -> Vec<&'a TransformRule> {
    rules.iter().filter(|rule| rule.matches(path)).collect()
}

/// The flattened stage chain the engine runs for `path`.
pub fn stages_for<'a>(path: &Path, rules: &'a [TransformRule]) -> Vec<&'a Stage> {
    rules_for(path, rules)
        .into_iter()
        .flat_map(|rule| rule.stages.iter())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn style_rule() -> RuleDecl {
        RuleDecl::test("styles", r"\.(sa|sc|c)ss$")
            .case_insensitive()
            .stage(StageDecl::new("sass-loader"))
            .stage(StageDecl::new("postcss-loader"))
            .stage(StageDecl::new("css-loader"))
            .stage(StageDecl::new("style-loader"))
    }

    #[test]
    fn style_chain_compiles_in_execution_order() {
        let rule = TransformRule::compile(&style_rule()).unwrap();
        let loaders: Vec<_> = rule.stages.iter().map(|s| s.loader.as_str()).collect();
        assert_eq!(
            loaders,
            ["sass-loader", "postcss-loader", "css-loader", "style-loader"]
        );
        assert!(rule.matches(Path::new("src/App.module.SCSS")));
        assert!(!rule.matches(Path::new("src/App.tsx")));
    }

    #[test]
    fn reversed_style_chain_is_incompatible() {
        let decl = RuleDecl::test("styles", r"\.css$")
            .stage(StageDecl::new("style-loader"))
            .stage(StageDecl::new("css-loader"));
        let err = TransformRule::compile(&decl).unwrap_err();
        match err {
            ConfigError::RuleCompatibility {
                rule,
                from,
                produces,
                to,
                expects,
            } => {
                assert_eq!(rule, "styles");
                assert_eq!(from, "style-loader");
                assert_eq!(produces, ContentKind::JsModule);
                assert_eq!(to, "css-loader");
                assert_eq!(expects, ContentKind::Css);
            }
            other => panic!("expected RuleCompatibility, got {other:?}"),
        }
    }

    #[test]
    fn unknown_loaders_are_unchecked() {
        let decl = RuleDecl::glob("css", "*.css")
            .stage(StageDecl::new("style"))
            .stage(StageDecl::new("css"));
        let rule = TransformRule::compile(&decl).unwrap();
        assert_eq!(rule.stages[0].input, ContentKind::Any);
        assert!(rule.matches(Path::new("/src/main.css")));
    }

    #[test]
    fn explicit_kinds_override_known_loaders() {
        let decl = RuleDecl::extensions("text", ["txt"])
            .stage(StageDecl::new("css-loader").with_kinds(ContentKind::RawText, ContentKind::RawText))
            .stage(StageDecl::new("raw-loader"));
        assert!(TransformRule::compile(&decl).is_ok());
    }

    #[test]
    fn exclude_wins_over_matcher() {
        let decl = RuleDecl::test("scripts", r"\.(js|jsx|ts|tsx)$")
            .exclude("node_modules")
            .stage(StageDecl::new("babel-loader"));
        let rule = TransformRule::compile(&decl).unwrap();
        assert!(rule.matches(Path::new("src/index.tsx")));
        assert!(!rule.matches(Path::new("node_modules/react/index.js")));
    }

    #[test]
    fn matcher_forms_are_exclusive() {
        let mut decl = RuleDecl::test("both", r"\.css$").stage(StageDecl::new("css-loader"));
        decl.glob = Some("*.css".into());
        assert!(matches!(
            TransformRule::compile(&decl),
            Err(ConfigError::InvalidMatcher { .. })
        ));

        let decl = RuleDecl::test("broken", r"\.(css$").stage(StageDecl::new("css-loader"));
        assert!(matches!(
            TransformRule::compile(&decl),
            Err(ConfigError::InvalidMatcher { rule, .. }) if rule == "broken"
        ));
    }

    #[test]
    fn rule_without_stages_is_rejected() {
        let decl = RuleDecl::glob("empty", "*.md");
        assert!(matches!(
            TransformRule::compile(&decl),
            Err(ConfigError::EmptyRule(name)) if name == "empty"
        ));
    }

    #[test]
    fn overlapping_rules_pipe_in_declaration_order() {
        let rules = vec![
            TransformRule::compile(&style_rule()).unwrap(),
            TransformRule::compile(
                &RuleDecl::extensions("modules", [".css"]).stage(StageDecl::new("css-modules")),
            )
            .unwrap(),
        ];

        let matched: Vec<_> = rules_for(Path::new("a/b.css"), &rules)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(matched, ["styles", "modules"]);

        let stages = stages_for(Path::new("a/b.css"), &rules);
        assert_eq!(stages.len(), 5);
        assert_eq!(stages.last().unwrap().loader, "css-modules");
    }

    #[test]
    fn unmatched_file_gets_empty_chain() {
        let rules = vec![TransformRule::compile(&style_rule()).unwrap()];
        assert!(rules_for(Path::new("logo.png"), &rules).is_empty());
        assert!(stages_for(Path::new("logo.png"), &rules).is_empty());
    }

    #[test]
    fn rule_serializes_for_handoff() {
        let decl = RuleDecl::test("html", r"\.html$")
            .stage(StageDecl::new("html-loader").with_options(json!({ "minimize": false })));
        let rule = TransformRule::compile(&decl).unwrap();
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["matcher"], json!({ "test": r"\.html$" }));
        assert_eq!(value["stages"][0]["input"], json!("html"));
        assert_eq!(value["stages"][0]["options"]["minimize"], json!(false));
        assert!(value.get("exclude").is_none());
    }
}
