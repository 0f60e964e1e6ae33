use std::collections::HashMap;
use std::fmt::Display;

use menu_tree::{Menu, NodeId};
use serde::{Deserialize, Serialize};
use termtree::Tree as DisplayTree;

use crate::node_label;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outline {
    Branch { label: String, nodes: Vec<Outline> },
    Leaf { label: String },
}

impl Outline {
    /// Outline of the subtree at `node`, or `None` for a dead handle.
    pub fn of(menu: &Menu, node: NodeId) -> Option<Outline> {
        let order: Vec<NodeId> = menu.descendants(node).collect();
        let mut built: HashMap<NodeId, Outline> = HashMap::with_capacity(order.len());
        // Children come after their owner in pre-order, so walk it backwards.
        for id in order.into_iter().rev() {
            let entry = menu.get(id)?;
            let label = node_label(entry);
            let outline = if entry.is_submenu() {
                let nodes = entry
                    .children()
                    .iter()
                    .filter_map(|child| built.remove(child))
                    .collect();
                Outline::Branch { label, nodes }
            } else {
                Outline::Leaf { label }
            };
            built.insert(id, outline);
        }
        built.remove(&node)
    }

    /// One outline per root, in order.
    pub fn forest(menu: &Menu) -> Vec<Outline> {
        menu.roots()
            .iter()
            .filter_map(|root| Outline::of(menu, *root))
            .collect()
    }

    pub fn label(&self) -> &str {
        match self {
            Outline::Branch { label, .. } | Outline::Leaf { label } => label,
        }
    }
}

impl Display for Outline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        DisplayTree::<String>::from(self.clone()).fmt(f)
    }
}

impl From<Outline> for DisplayTree<String> {
    fn from(value: Outline) -> Self {
        match value {
            Outline::Branch { label, nodes } => DisplayTree::new(label).with_leaves(nodes),
            Outline::Leaf { label } => DisplayTree::new(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use menu_tree::{Accelerator, MenuItem};

    use super::*;

    fn file_menu() -> Menu {
        Menu::from_items([MenuItem::submenu_with_id(
            "File",
            "file",
            vec![
                MenuItem::text("Open", "file.open", Some(Accelerator::cmd_or_ctrl("O"))),
                MenuItem::separator(),
                MenuItem::submenu_with_id(
                    "Recent",
                    "file.recent",
                    vec![MenuItem::text("notes.txt", "recent.0", None)],
                ),
            ],
        )])
        .unwrap()
    }

    #[test]
    fn outline_shape() {
        let menu = file_menu();
        let outline = Outline::of(&menu, menu.roots()[0]).unwrap();
        let Outline::Branch { label, nodes } = &outline else {
            panic!("expected a branch");
        };
        assert_eq!(label, "File #file");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].label(), "Open #file.open <CmdOrCtrl+O>");
        assert!(matches!(&nodes[2], Outline::Branch { nodes, .. } if nodes.len() == 1));
    }

    #[test]
    fn display_lists_every_node() {
        let menu = file_menu();
        let text = Outline::forest(&menu)
            .iter()
            .map(ToString::to_string)
            .collect::<String>();
        for needle in ["File #file", "Open #file.open", "────────", "Recent", "notes.txt #recent.0"] {
            assert!(text.contains(needle), "missing {needle:?} in\n{text}");
        }
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn dead_handle_has_no_outline() {
        let mut menu = file_menu();
        let root = menu.roots()[0];
        menu.detach(root).unwrap();
        assert_eq!(Outline::of(&menu, root), None);
        assert!(Outline::forest(&menu).is_empty());
    }

    #[test]
    fn deep_menu() {
        const DEPTH: usize = 1_000;
        let mut menu = Menu::new();
        let root = menu.insert_root(MenuItem::submenu("Level 0", vec![])).unwrap();
        let mut parent = root;
        for level in 1..=DEPTH {
            parent = menu
                .append(parent, MenuItem::submenu(format!("Level {level}"), vec![]))
                .unwrap();
        }

        let mut outline = Outline::of(&menu, root).unwrap();
        let mut depth = 0;
        while let Outline::Branch { label, mut nodes } = outline {
            assert_eq!(label, format!("Level {depth}"));
            match nodes.pop() {
                Some(next) => outline = next,
                None => break,
            }
            depth += 1;
        }
        assert_eq!(depth, DEPTH);
    }

    #[test]
    fn serializes() {
        let menu = file_menu();
        let json = serde_json::to_value(Outline::forest(&menu)).unwrap();
        assert_eq!(json[0]["Branch"]["label"], "File #file");
    }
}
