//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Hierarchical registry of named views over a collection of items
#[derive(Parser, Debug)]
#[command(name = "viewtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Store file (overrides the configured store_path)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub store: Option<PathBuf>,

    /// Additional config file, applied over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the tree
    Show,

    /// Find a view by name (top-level views shadow nested ones)
    Resolve {
        /// View name
        name: String,
    },

    /// Create a view
    Create {
        /// Name of the new view
        name: String,
        /// Create a container that can nest views
        #[arg(long, conflicts_with = "copy_of")]
        container: bool,
        /// Copy an existing view (resolved by name)
        #[arg(long)]
        copy_of: Option<String>,
        /// Container to create the view in (default: top level)
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Delete a view
    Delete {
        /// View name
        name: String,
        /// Container the view is a direct child of (default: top level)
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Rename a view
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },

    /// List views one per row with indentation
    Rows {
        /// Fixed indentation depth for every row
        #[arg(long, conflicts_with = "tree_depth")]
        depth: Option<String>,
        /// Indent rows by their depth in the tree
        #[arg(long)]
        tree_depth: bool,
    },

    /// Manage items of the owning collection
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Create an item through the tree
    Create {
        /// Item name
        name: String,
    },
    /// List all items of the owning collection
    List,
    /// Show item names tracked by the tree
    Names,
    /// Rename an item and update the tracked names
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a config template
    Template,
    /// Show the global config file location
    Path,
}
