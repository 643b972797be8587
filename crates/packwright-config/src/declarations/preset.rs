use std::path::PathBuf;

use serde_json::json;

use super::{default_extensions, AliasDecl, Declarations, OutputDecl};
use crate::dev::DevServerOptions;
use crate::output::NamingRules;
use crate::plugins::PluginSpec;
use crate::rules::{RuleDecl, StageDecl};

impl Declarations {
    /// A React + TypeScript single-page app.
    ///
    /// Entry `src/index.tsx`, html/script/style rules, the html plugin in
    /// every build plus react-refresh (development) or CSS extraction
    /// (production), `@pages` aliased to `src/pages`, and `build/` as the
    /// output directory.
    pub fn react_app() -> Self {
        let babel = StageDecl::new("babel-loader")
            .with_options(json!({ "plugins": [] }))
            .with_profile("development", json!({ "plugins": ["react-refresh/babel"] }));

        Self {
            root: None,
            entries: vec![PathBuf::from("src/index.tsx")],
            rules: vec![
                RuleDecl::test("html", r"\.html$").stage(StageDecl::new("html-loader")),
                RuleDecl::test("scripts", r"\.(js|jsx|ts|tsx)$")
                    .exclude("node_modules")
                    .stage(babel),
                RuleDecl::test("styles", r"\.(sa|sc|c)ss$")
                    .case_insensitive()
                    .stage(StageDecl::new("sass-loader"))
                    .stage(StageDecl::new("postcss-loader"))
                    .stage(StageDecl::new("css-loader"))
                    .stage(StageDecl::new("style-loader")),
            ],
            plugins: vec![
                PluginSpec::always("html-webpack-plugin")
                    .with_options(json!({ "template": "./public/index.html" })),
                PluginSpec::development_only("react-refresh-webpack-plugin"),
                PluginSpec::production_only("mini-css-extract-plugin"),
            ],
            aliases: vec![AliasDecl::new("@pages", "src/pages")],
            search_roots: vec![PathBuf::from("src"), PathBuf::from("node_modules")],
            extensions: default_extensions(),
            output: OutputDecl {
                dir: PathBuf::from("build"),
                naming: NamingRules::default(),
            },
            dev_server: DevServerOptions::default(),
            profiles: Default::default(),
        }
    }
}
