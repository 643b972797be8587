//! Integration tests for the CLI commands.
//!
//! Each test scaffolds a project in a temp directory with `init`, then drives
//! the commands through their public functions with `--cwd` pointing at it.

use packwright_cli::cli::{BuildArgs, CheckArgs, InitArgs, LoadArgs, ModeArg, ResolveArgs};
use packwright_cli::commands::{build, check, init, resolve};
use packwright_cli::{CliError, LoadError};
use serde_json::Value;
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn scaffold() -> TempDir {
    let temp = TempDir::new().unwrap();
    init::write_starter(&InitArgs {
        force: false,
        cwd: Some(temp.path().to_path_buf()),
    })
    .unwrap();
    temp
}

fn load_args(dir: &Path) -> LoadArgs {
    LoadArgs {
        cwd: Some(dir.to_path_buf()),
        ..LoadArgs::default()
    }
}

fn build_to_file(dir: &Path, load: LoadArgs) -> Value {
    let output = dir.join("out/pipeline.json");
    build::execute(BuildArgs {
        load,
        output: Some(output.clone()),
        compact: true,
    })
    .unwrap();
    serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap()
}

fn plugin_names(value: &Value) -> Vec<&str> {
    value["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect()
}

#[test]
#[serial]
fn test_build_development_handoff() {
    unsafe { std::env::remove_var("NODE_ENV") };
    let temp = scaffold();

    let value = build_to_file(temp.path(), load_args(temp.path()));

    assert_eq!(value["mode"], "development");
    assert_eq!(
        plugin_names(&value),
        vec!["html-webpack-plugin", "react-refresh-webpack-plugin"]
    );
    assert_eq!(value["outputPlan"]["bundleFileName"], "index.js");
    assert_eq!(
        PathBuf::from(value["outputPlan"]["rootDirectory"].as_str().unwrap()),
        temp.path().join("build")
    );
}

#[test]
#[serial]
fn test_mode_flag_beats_node_env() {
    unsafe { std::env::set_var("NODE_ENV", "production") };
    let temp = scaffold();

    let from_env = build_to_file(temp.path(), load_args(temp.path()));
    let from_flag = build_to_file(
        temp.path(),
        LoadArgs {
            mode: Some(ModeArg::Development),
            ..load_args(temp.path())
        },
    );
    unsafe { std::env::remove_var("NODE_ENV") };

    assert_eq!(from_env["mode"], "production");
    assert_eq!(
        plugin_names(&from_env),
        vec!["html-webpack-plugin", "mini-css-extract-plugin"]
    );
    assert_eq!(from_flag["mode"], "development");
}

#[test]
#[serial]
fn test_out_dir_flag_overrides_env() {
    unsafe {
        std::env::remove_var("NODE_ENV");
        std::env::set_var("PACKWRIGHT_OUTPUT__DIR", "env-dist");
    }
    let temp = scaffold();

    let from_env = build_to_file(temp.path(), load_args(temp.path()));
    let from_flag = build_to_file(
        temp.path(),
        LoadArgs {
            out_dir: Some(PathBuf::from("flag-dist")),
            ..load_args(temp.path())
        },
    );
    unsafe { std::env::remove_var("PACKWRIGHT_OUTPUT__DIR") };

    assert_eq!(
        PathBuf::from(from_env["outputPlan"]["rootDirectory"].as_str().unwrap()),
        temp.path().join("env-dist")
    );
    assert_eq!(
        PathBuf::from(from_flag["outputPlan"]["rootDirectory"].as_str().unwrap()),
        temp.path().join("flag-dist")
    );
}

#[test]
#[serial]
fn test_render_pretty_and_compact() {
    unsafe { std::env::remove_var("NODE_ENV") };
    let temp = scaffold();
    let loaded = packwright_cli::config::load(&load_args(temp.path())).unwrap();
    let pipeline = loaded.assemble().unwrap();

    let pretty = build::render(&pipeline, false).unwrap();
    let compact = build::render(&pipeline, true).unwrap();

    assert!(pretty.contains('\n'));
    assert!(!compact.contains('\n'));
    let a: Value = serde_json::from_str(&pretty).unwrap();
    let b: Value = serde_json::from_str(&compact).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = scaffold();
    let path = temp.path().join("packwright.toml");
    fs::write(&path, "# mine\n").unwrap();

    let err = init::write_starter(&InitArgs {
        force: false,
        cwd: Some(temp.path().to_path_buf()),
    })
    .unwrap_err();
    assert!(matches!(err, CliError::Load(LoadError::AlreadyExists(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

    init::write_starter(&InitArgs {
        force: true,
        cwd: Some(temp.path().to_path_buf()),
    })
    .unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("html-webpack-plugin"));
}

#[test]
#[serial]
fn test_check_passes_and_reports_missing_entries() {
    unsafe { std::env::remove_var("NODE_ENV") };
    let temp = scaffold();

    check::execute(CheckArgs {
        load: load_args(temp.path()),
    })
    .unwrap();

    let loaded = packwright_cli::config::load(&load_args(temp.path())).unwrap();
    let pipeline = loaded.assemble().unwrap();
    assert_eq!(
        check::missing_entries(&pipeline),
        vec![temp.path().join("src/index.tsx")]
    );

    fs::create_dir_all(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("src/index.tsx"), "").unwrap();
    assert!(check::missing_entries(&pipeline).is_empty());
}

#[test]
#[serial]
fn test_check_rejects_broken_plugins() {
    unsafe { std::env::remove_var("NODE_ENV") };
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("packwright.toml"),
        r#"
entries = ["src/index.ts"]

[[plugins]]
name = "only-dev"
applicability = "developmentOnly"
"#,
    )
    .unwrap();

    let err = check::execute(CheckArgs {
        load: LoadArgs {
            mode: Some(ModeArg::Production),
            ..load_args(temp.path())
        },
    })
    .unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}

#[test]
#[serial]
fn test_resolve_alias_relative_and_search_root() {
    unsafe { std::env::remove_var("NODE_ENV") };
    let temp = scaffold();
    let pages = temp.path().join("src/pages");
    fs::create_dir_all(&pages).unwrap();
    fs::write(pages.join("Home.tsx"), "").unwrap();

    let resolved = resolve::resolve(&ResolveArgs {
        specifier: "@pages/Home".to_string(),
        from: None,
        load: load_args(temp.path()),
    })
    .unwrap();
    assert_eq!(resolved, pages.join("Home"));

    let relative = resolve::resolve(&ResolveArgs {
        specifier: "./Home".to_string(),
        from: Some(PathBuf::from("src/pages/App.tsx")),
        load: load_args(temp.path()),
    })
    .unwrap();
    assert_eq!(relative, pages.join("Home"));

    let bare = resolve::resolve(&ResolveArgs {
        specifier: "pages/Home".to_string(),
        from: None,
        load: load_args(temp.path()),
    })
    .unwrap();
    assert_eq!(bare, temp.path().join("src/pages/Home"));
}

#[test]
#[serial]
fn test_resolve_unknown_package_fails() {
    unsafe { std::env::remove_var("NODE_ENV") };
    let temp = scaffold();

    let err = resolve::resolve(&ResolveArgs {
        specifier: "left-pad".to_string(),
        from: None,
        load: load_args(temp.path()),
    })
    .unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}
