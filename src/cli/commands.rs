//! Command dispatch: maps parsed arguments onto tree operations.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, TreeNodeConvert, ViewTree};
use crate::cli::args::{Cli, Commands, ConfigCommands, ItemCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{
    FixedIndenter, Indenter, ItemRequest, NodeRef, NodeRequest, RenameEvent, TreeDepthIndenter,
};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| CliError::Usage(e.to_string()))?;
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(store) = &cli.store {
        settings.override_store_path(store);
    }
    debug!("settings: {:?}", settings);

    if let Commands::Config { command } = command {
        return config_command(command, &settings);
    }

    let container = ServiceContainer::new(settings)?;
    let tree = container.open_tree();

    match command {
        Commands::Show => {
            output::info(&tree.to_tree_string());
            Ok(())
        }
        Commands::Resolve { name } => resolve(&tree, name),
        Commands::Create {
            name,
            container,
            copy_of,
            parent,
        } => {
            let request = match copy_of {
                Some(source) => NodeRequest::copy_of(name.as_str(), source.as_str()),
                None if *container => NodeRequest::container(name.as_str()),
                None => NodeRequest::leaf(name.as_str()),
            };
            create(&tree, &request, parent.as_deref())
        }
        Commands::Delete { name, parent } => delete(&tree, name, parent.as_deref()),
        Commands::Rename { old, new } => {
            let node = find(&tree, old)?;
            if tree.rename_node(&node, new)? {
                output::action("Renamed", &format!("{} -> {}", old, new));
            } else {
                output::info(&format!("'{}' unchanged", old));
            }
            Ok(())
        }
        Commands::Rows { depth, tree_depth } => {
            let indenter: Box<dyn Indenter> = match depth {
                Some(depth) => Box::new(FixedIndenter::parse(depth).map_err(ApplicationError::from)?),
                None if *tree_depth => Box::new(TreeDepthIndenter),
                None => container.settings.indent.indenter(),
            };
            for row in tree.rows() {
                output::info(&format!("{}{}", indenter.indent(&row), row.node));
            }
            Ok(())
        }
        Commands::Item { command } => item_command(&container, &tree, command),
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}

fn find(tree: &ViewTree, name: &str) -> CliResult<NodeRef> {
    tree.resolve(name)
        .ok_or_else(|| CliError::InvalidArgs(format!("no view named '{}'", name)))
}

#[instrument(skip(tree))]
fn resolve(tree: &ViewTree, name: &str) -> CliResult<()> {
    match tree.resolve(name) {
        Some(node) => {
            let kind = if node.is_container() { "container" } else { "view" };
            output::info(&format!("{}\t{}\t{}", node.name(), kind, node.id()));
        }
        None => output::warning(&format!("no view named '{}'", name)),
    }
    Ok(())
}

#[instrument(skip(tree))]
fn create(tree: &ViewTree, request: &NodeRequest, parent: Option<&str>) -> CliResult<()> {
    let node = match parent {
        Some(parent) => {
            let parent = find(tree, parent)?;
            tree.create_node_in(&parent, request)?
        }
        None => tree.create_node(request)?,
    };
    output::success(&format!("created view {}", node));
    Ok(())
}

#[instrument(skip(tree))]
fn delete(tree: &ViewTree, name: &str, parent: Option<&str>) -> CliResult<()> {
    let deleted = match parent {
        Some(parent_name) => {
            let parent = find(tree, parent_name)?;
            match parent.children().and_then(|c| c.get(name)) {
                Some(node) => tree.delete_nested(&parent, &node)?,
                None => false,
            }
        }
        None => match tree.resolve(name) {
            Some(node) => tree.delete_node(&node)?,
            None => false,
        },
    };
    if deleted {
        output::action("Deleted", name);
    } else {
        output::warning(&format!(
            "'{}' is not a direct child here; nothing deleted (use --parent for nested views)",
            name
        ));
    }
    Ok(())
}

fn item_command(
    container: &ServiceContainer,
    tree: &ViewTree,
    command: &ItemCommands,
) -> CliResult<()> {
    match command {
        ItemCommands::Create { name } => {
            match tree.create_item(&ItemRequest::new(name.as_str()))? {
                Some(item) => output::success(&format!("created item {}", item)),
                None => output::warning("owning collection is read-only; no item created"),
            }
            Ok(())
        }
        ItemCommands::List => {
            for item in tree.list_items()? {
                output::info(&item);
            }
            Ok(())
        }
        ItemCommands::Names => {
            for name in tree.job_names().names() {
                output::info(&name);
            }
            Ok(())
        }
        ItemCommands::Rename { old, new } => {
            if !container.store.rename_item(old, new)? {
                return Err(CliError::InvalidArgs(format!("no item named '{}'", old)));
            }
            let tracked = tree.on_rename(RenameEvent::Item {
                old_name: old.clone(),
                new_name: new.clone(),
            })?;
            output::action("Renamed", &format!("{} -> {}", old, new));
            if !tracked {
                output::detail("item was not tracked by this tree");
            }
            Ok(())
        }
    }
}

fn config_command(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory on this platform"),
        },
    }
    Ok(())
}
