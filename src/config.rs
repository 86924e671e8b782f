//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/viewtree/viewtree.toml`
//! 3. Local config: file given with `--config`
//! 4. Environment variables: `VIEWTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{IndentStrategy, Permission};

/// Unified configuration for viewtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Store file holding the tree and its items
    pub store_path: PathBuf,
    /// Name given to a tree created from scratch
    pub tree_name: String,
    /// Permissions granted to the CLI user
    pub granted: Vec<Permission>,
    /// Row indentation used by `rows`
    pub indent: IndentStrategy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            tree_name: "main".into(),
            granted: vec![Permission::CreateView, Permission::ConfigureView],
            indent: IndentStrategy::default(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub store_path: Option<PathBuf>,
    pub tree_name: Option<String>,
    pub granted: Option<Vec<Permission>>,
    pub indent: Option<IndentStrategy>,
}

/// Get the default store path (XDG data dir, falling back to ~/.viewtree).
fn default_store_path() -> PathBuf {
    ProjectDirs::from("", "", "viewtree")
        .map(|dirs| dirs.data_dir().join("tree.toml"))
        .unwrap_or_else(|| PathBuf::from("~/.viewtree/tree.toml"))
}

/// Get the XDG config directory for viewtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "viewtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("viewtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}` in a path.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            store_path: overlay
                .store_path
                .clone()
                .unwrap_or_else(|| self.store_path.clone()),
            tree_name: overlay
                .tree_name
                .clone()
                .unwrap_or_else(|| self.tree_name.clone()),
            granted: overlay
                .granted
                .clone()
                .unwrap_or_else(|| self.granted.clone()),
            indent: overlay.indent.unwrap_or(self.indent),
        }
    }

    /// Point at another store file, expanded like a configured `store_path`.
    pub fn override_store_path(&mut self, path: &Path) {
        self.store_path = expand_path(path);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file given on the command line; it must exist
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local_path) = local {
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.store_path = expand_path(&current.store_path);

        Ok(current)
    }

    /// Apply VIEWTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("VIEWTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("store_path") {
            settings.store_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("tree_name") {
            settings.tree_name = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# viewtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/viewtree/viewtree.toml
#   Local:  file passed with --config
#   Env:    VIEWTREE_STORE_PATH, VIEWTREE_TREE_NAME

# Store file holding the tree and its items
# store_path = "~/.local/share/viewtree/tree.toml"

# Name of a tree created from scratch
# tree_name = "main"

# Permissions granted to the CLI user
# granted = ["create-view", "configure-view"]

# Row indentation: same depth for every row ...
# [indent]
# strategy = "fixed"
# depth = 0
#
# ... or follow the position in the tree
# [indent]
# strategy = "tree-depth"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
