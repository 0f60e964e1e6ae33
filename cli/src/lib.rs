mod config;

use std::{env, path::PathBuf};

use clap::{Parser, Subcommand};
use menu_tree::{InsertError, Menu, MenuError, MenuItem, NodeId};
use menu_view::Outline;
use thiserror::Error;
use tracing::info;

pub use crate::config::{ConfigError, MenuConfig, MenuFormat};

#[derive(Parser, Debug)]
#[command(name = "menu", version, about = "Inspect and edit menu trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Menu file, or a directory containing menu.toml
    #[arg(long = "menu", global = true)]
    pub menu_path: Option<PathBuf>,

    #[arg(long = "log", global = true, default_value = "info")]
    pub log: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the whole menu
    Show {
        /// Print the outline as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the first node with the given id
    Find { id: String },
    /// Add an item as the last child of a submenu
    Append {
        #[arg(long)]
        parent: String,

        /// Item as a JSON object.
        #[arg(long, value_parser = parse_item)]
        item: MenuItem,

        #[arg(long)]
        write: bool,
    },
    /// Add an item as the first child of a submenu
    Prepend {
        #[arg(long)]
        parent: String,

        /// Item as a JSON object.
        #[arg(long, value_parser = parse_item)]
        item: MenuItem,

        #[arg(long)]
        write: bool,
    },
    /// Add an item right after a sibling
    InsertAfter {
        #[arg(long)]
        target: String,

        /// Item as a JSON object.
        #[arg(long, value_parser = parse_item)]
        item: MenuItem,

        #[arg(long)]
        write: bool,
    },
    /// Add an item right before a sibling
    InsertBefore {
        #[arg(long)]
        target: String,

        /// Item as a JSON object.
        #[arg(long, value_parser = parse_item)]
        item: MenuItem,

        #[arg(long)]
        write: bool,
    },
    /// Remove the first node with the given id, and everything under it
    Remove {
        id: String,

        #[arg(long)]
        write: bool,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error("cannot insert \"{}\": {}", .0.item.label, .0.kind)]
    Insert(#[from] InsertError),

    #[error("menu id not found: {id}")]
    IdNotFound { id: String },

    #[error("failed to print outline: {0}")]
    Json(#[from] serde_json::Error),
}

fn parse_item(value: &str) -> Result<MenuItem, serde_json::Error> {
    serde_json::from_str(value)
}

pub fn menu_path(cli: &Cli) -> PathBuf {
    cli.menu_path
        .clone()
        .or_else(|| env::var("MENU_FILE").ok().map(PathBuf::from))
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = MenuConfig::load(&menu_path(&cli))?;
    match cli.command {
        Command::Show { json } => cmd_show(&config, json),
        Command::Find { id } => cmd_find(&config, &id),
        Command::Append {
            parent,
            item,
            write,
        } => {
            let parent = resolve(&config.menu, &parent)?;
            config.menu.append(parent, item)?;
            finish(&config, write)
        }
        Command::Prepend {
            parent,
            item,
            write,
        } => {
            let parent = resolve(&config.menu, &parent)?;
            config.menu.prepend(parent, item)?;
            finish(&config, write)
        }
        Command::InsertAfter {
            target,
            item,
            write,
        } => {
            let target = resolve(&config.menu, &target)?;
            config.menu.insert_after(target, item)?;
            finish(&config, write)
        }
        Command::InsertBefore {
            target,
            item,
            write,
        } => {
            let target = resolve(&config.menu, &target)?;
            config.menu.insert_before(target, item)?;
            finish(&config, write)
        }
        Command::Remove { id, write } => {
            let removed = remove(&mut config.menu, &id)?;
            info!(id, nodes = removed.subtree_len(), "Removed item");
            finish(&config, write)
        }
    }
}

fn cmd_show(config: &MenuConfig, json: bool) -> Result<(), AppError> {
    let forest = Outline::forest(&config.menu);
    if json {
        println!("{}", serde_json::to_string_pretty(&forest)?);
    } else {
        print_forest(&forest);
    }
    Ok(())
}

fn cmd_find(config: &MenuConfig, id: &str) -> Result<(), AppError> {
    let node = resolve(&config.menu, id)?;
    if let Some(outline) = Outline::of(&config.menu, node) {
        print!("{outline}");
    }
    Ok(())
}

fn finish(config: &MenuConfig, write: bool) -> Result<(), AppError> {
    print_forest(&Outline::forest(&config.menu));
    if write {
        config.save()?;
        info!(path = %config.path.display(), "Saved menu");
    }
    Ok(())
}

fn print_forest(forest: &[Outline]) {
    for outline in forest {
        print!("{outline}");
    }
}

fn resolve(menu: &Menu, id: &str) -> Result<NodeId, AppError> {
    menu.find_by_id(id).ok_or_else(|| AppError::IdNotFound { id: id.to_owned() })
}

/// Removes the first node with `id` in pre-order across the roots, roots
/// included.
pub fn remove(menu: &mut Menu, id: &str) -> Result<MenuItem, AppError> {
    for root in menu.roots().to_vec() {
        if menu.get(root).is_some_and(|node| node.id == id) {
            return Ok(menu.detach(root)?);
        }
        match menu.remove_by_id(root, id) {
            Ok(item) => return Ok(item),
            Err(MenuError::NotFound { .. }) => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Err(AppError::IdNotFound { id: id.to_owned() })
}
