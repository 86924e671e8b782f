use std::fs;

use tempfile::TempDir;
use viewtree::config::Settings;
use viewtree::domain::{IndentStrategy, Permission};

#[test]
fn given_local_config_when_loading_then_values_applied() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("viewtree.toml");
    fs::write(
        &path,
        r#"
tree_name = "local"
store_path = "/tmp/viewtree-test/tree.toml"
granted = ["create-view"]

[indent]
strategy = "tree-depth"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).unwrap();

    assert_eq!(settings.tree_name, "local");
    assert_eq!(settings.granted, vec![Permission::CreateView]);
    assert_eq!(settings.indent, IndentStrategy::TreeDepth);
}

#[test]
fn given_fixed_indent_in_config_when_loading_then_depth_kept() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("viewtree.toml");
    fs::write(&path, "[indent]\nstrategy = \"fixed\"\ndepth = 2\n").unwrap();

    let settings = Settings::load(Some(&path)).unwrap();

    assert_eq!(settings.indent, IndentStrategy::Fixed { depth: 2 });
}

#[test]
fn given_missing_local_config_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    assert!(Settings::load(Some(&temp.path().join("nope.toml"))).is_err());
}

#[test]
fn given_invalid_toml_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("viewtree.toml");
    fs::write(&path, "granted = [\"fly\"]").unwrap();

    assert!(Settings::load(Some(&path)).is_err());
}
