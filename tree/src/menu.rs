use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{MenuItem, MenuNode, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("node {0} is not in this menu")]
    NodeMissing(NodeId),

    #[error("node {0} is not a submenu")]
    NotASubmenu(NodeId),

    #[error("node {0} is a root and has no siblings")]
    NoParent(NodeId),

    #[error("node {target} is not a child of {parent}")]
    TargetNotFound { parent: NodeId, target: NodeId },

    #[error("index {index} is out of bounds for a submenu of {len} items")]
    OutOfBounds { index: usize, len: usize },

    #[error("no node with id \"{id}\"")]
    NotFound { id: String },

    #[error("item \"{id}\" has children but is not a submenu")]
    LeafWithChildren { id: String },
}

/// A failed insert. The menu is unchanged and the item is handed back, so a
/// detached subtree can be retried elsewhere instead of being lost.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct InsertError {
    pub kind: MenuError,
    pub item: MenuItem,
}

impl InsertError {
    fn new(kind: MenuError, item: MenuItem) -> Self {
        Self { kind, item }
    }

    pub fn kind(&self) -> &MenuError {
        &self.kind
    }

    pub fn into_item(self) -> MenuItem {
        self.item
    }
}

impl From<InsertError> for MenuError {
    fn from(value: InsertError) -> Self {
        value.kind
    }
}

/// An ordered forest of menu nodes.
///
/// Every node lives in a slot of the menu and is addressed by a [`NodeId`].
/// Ownership runs from a submenu to its children; each child records its
/// owner as `parent`. Roots have no parent and are kept in order.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    nodes: Vec<Option<MenuNode>>,
    roots: Vec<NodeId>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a menu with one root per item, linking every child to its
    /// owner.
    pub fn from_items<I>(items: I) -> Result<Self, MenuError>
    where
        I: IntoIterator<Item = MenuItem>,
    {
        let mut menu = Menu::new();
        for item in items {
            menu.insert_root(item)?;
        }
        Ok(menu)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of nodes currently in the menu.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn get(&self, node: NodeId) -> Option<&MenuNode> {
        self.nodes.get(node.0)?.as_ref()
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut MenuNode> {
        self.nodes.get_mut(node.0)?.as_mut()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent()
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(MenuNode::children).unwrap_or_default()
    }

    /// Adds a new root after the existing ones.
    pub fn insert_root(&mut self, item: MenuItem) -> Result<NodeId, InsertError> {
        if let Err(kind) = check_item(&item) {
            return Err(InsertError::new(kind, item));
        }
        let root = self.plant(item, None);
        self.roots.push(root);
        debug!(root = %root, "Inserted root");
        Ok(root)
    }

    pub fn append(&mut self, menu: NodeId, item: MenuItem) -> Result<NodeId, InsertError> {
        match self.submenu(menu).map(|node| node.children().len()) {
            Ok(len) => self.insert(menu, len, item),
            Err(kind) => Err(InsertError::new(kind, item)),
        }
    }

    pub fn prepend(&mut self, menu: NodeId, item: MenuItem) -> Result<NodeId, InsertError> {
        self.insert(menu, 0, item)
    }

    /// Inserts `item` as the next sibling of `target`.
    pub fn insert_after(&mut self, target: NodeId, item: MenuItem) -> Result<NodeId, InsertError> {
        match self.locate(target) {
            Ok((parent, index)) => self.insert(parent, index + 1, item),
            Err(kind) => Err(InsertError::new(kind, item)),
        }
    }

    /// Inserts `item` as the previous sibling of `target`, shifting `target`
    /// one position later.
    pub fn insert_before(&mut self, target: NodeId, item: MenuItem) -> Result<NodeId, InsertError> {
        match self.locate(target) {
            Ok((parent, index)) => self.insert(parent, index, item),
            Err(kind) => Err(InsertError::new(kind, item)),
        }
    }

    /// Inserts `item` at `index` among the children of `menu`.
    ///
    /// An index equal to the number of children appends. On error nothing
    /// changes and the item comes back inside the [`InsertError`].
    pub fn insert(
        &mut self,
        menu: NodeId,
        index: usize,
        item: MenuItem,
    ) -> Result<NodeId, InsertError> {
        let checked = self
            .submenu(menu)
            .map(|node| node.children().len())
            .and_then(|len| {
                if index > len {
                    return Err(MenuError::OutOfBounds { index, len });
                }
                check_item(&item)
            });
        if let Err(kind) = checked {
            return Err(InsertError::new(kind, item));
        }

        let child = self.plant(item, Some(menu));
        if let Some(owner) = self.get_mut(menu) {
            owner.children_mut().insert(index, child);
        }
        debug!(menu = %menu, index, child = %child, "Inserted item");
        Ok(child)
    }

    /// Position of `target` among the children of `menu`, by identity.
    pub fn index_of(&self, menu: NodeId, target: NodeId) -> Result<usize, MenuError> {
        self.submenu(menu)?
            .children()
            .iter()
            .position(|child| *child == target)
            .ok_or(MenuError::TargetNotFound {
                parent: menu,
                target,
            })
    }

    /// First node in pre-order, starting with `from` itself, whose id equals
    /// `id`.
    pub fn get_by_id(&self, from: NodeId, id: &str) -> Option<NodeId> {
        let found = self.descendants(from).find(|node| self.has_id(*node, id));
        trace!(from = %from, id, found = ?found, "Looked up id");
        found
    }

    /// [`Menu::get_by_id`] over every root in order.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.roots
            .iter()
            .find_map(|root| self.get_by_id(*root, id))
    }

    /// Detaches the first descendant of `from` (pre-order, `from` excluded)
    /// whose id equals `id`, returning its subtree.
    pub fn remove_by_id(&mut self, from: NodeId, id: &str) -> Result<MenuItem, MenuError> {
        self.node(from)?;
        let found = self
            .descendants(from)
            .skip(1)
            .find(|node| self.has_id(*node, id))
            .ok_or_else(|| MenuError::NotFound { id: id.to_owned() })?;
        self.detach(found)
    }

    /// Removes `node` and its whole subtree from the menu.
    pub fn detach(&mut self, node: NodeId) -> Result<MenuItem, MenuError> {
        let parent = self.node(node)?.parent();
        match parent {
            Some(parent) => {
                let index = self.index_of(parent, node)?;
                self.submenu_mut(parent)?.children_mut().remove(index);
            }
            None => self.roots.retain(|root| *root != node),
        }

        let item = self.uproot(node).ok_or(MenuError::NodeMissing(node))?;
        debug!(node = %node, parent = ?parent, size = item.subtree_len(), "Detached subtree");
        Ok(item)
    }

    /// Pre-order walk starting at (and including) `node`.
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        let stack = match self.get(node) {
            Some(_) => vec![node],
            None => Vec::new(),
        };
        Descendants { menu: self, stack }
    }

    /// Copies the subtree rooted at `node` out as a detached item.
    pub fn to_item(&self, node: NodeId) -> Option<MenuItem> {
        let order: Vec<NodeId> = self.descendants(node).collect();
        let mut built: HashMap<NodeId, MenuItem> = HashMap::with_capacity(order.len());
        // Reverse pre-order builds every child before its owner.
        for id in order.into_iter().rev() {
            let entry = self.get(id)?;
            let children = collect_built(&mut built, entry.children());
            built.insert(id, entry.to_item(children));
        }
        built.remove(&node)
    }

    pub fn to_items(&self) -> Vec<MenuItem> {
        self.roots
            .iter()
            .filter_map(|root| self.to_item(*root))
            .collect()
    }

    fn node(&self, node: NodeId) -> Result<&MenuNode, MenuError> {
        self.get(node).ok_or_else(|| {
            warn!(node = %node, "Stale or foreign node handle");
            MenuError::NodeMissing(node)
        })
    }

    fn submenu(&self, menu: NodeId) -> Result<&MenuNode, MenuError> {
        let node = self.node(menu)?;
        if !node.is_submenu() {
            return Err(MenuError::NotASubmenu(menu));
        }
        Ok(node)
    }

    fn submenu_mut(&mut self, menu: NodeId) -> Result<&mut MenuNode, MenuError> {
        self.submenu(menu)?;
        self.get_mut(menu).ok_or(MenuError::NodeMissing(menu))
    }

    fn locate(&self, target: NodeId) -> Result<(NodeId, usize), MenuError> {
        let parent = self
            .node(target)?
            .parent()
            .ok_or(MenuError::NoParent(target))?;
        let index = self.index_of(parent, target)?;
        Ok((parent, index))
    }

    fn has_id(&self, node: NodeId, id: &str) -> bool {
        self.get(node).is_some_and(|node| node.id == id)
    }

    /// Allocates the subtree of `item`, linking each child to its owner.
    /// The returned root is not yet listed by `parent` or in `roots`.
    fn plant(&mut self, item: MenuItem, parent: Option<NodeId>) -> NodeId {
        let (root, children) = self.alloc(item, parent);
        let mut stack: Vec<(MenuItem, NodeId)> =
            children.into_iter().rev().map(|child| (child, root)).collect();
        while let Some((item, owner)) = stack.pop() {
            let (node, children) = self.alloc(item, Some(owner));
            if let Some(owner) = self.get_mut(owner) {
                owner.children_mut().push(node);
            }
            stack.extend(children.into_iter().rev().map(|child| (child, node)));
        }
        root
    }

    fn alloc(&mut self, item: MenuItem, parent: Option<NodeId>) -> (NodeId, Vec<MenuItem>) {
        let id = NodeId(self.nodes.len());
        let (node, children) = MenuNode::from_item(item, parent);
        self.nodes.push(Some(node));
        (id, children)
    }

    /// Empties the slots of the subtree rooted at `node`.
    fn uproot(&mut self, node: NodeId) -> Option<MenuItem> {
        let order: Vec<NodeId> = self.descendants(node).collect();
        let mut built: HashMap<NodeId, MenuItem> = HashMap::with_capacity(order.len());
        for id in order.into_iter().rev() {
            let taken = self.nodes.get_mut(id.0)?.take()?;
            let children = collect_built(&mut built, taken.children());
            built.insert(id, taken.into_item(children));
        }
        built.remove(&node)
    }
}

fn collect_built(built: &mut HashMap<NodeId, MenuItem>, children: &[NodeId]) -> Vec<MenuItem> {
    children
        .iter()
        .filter_map(|child| built.remove(child))
        .collect()
}

/// Rejects items that would put children under a non-submenu.
fn check_item(item: &MenuItem) -> Result<(), MenuError> {
    let mut stack = vec![item];
    while let Some(item) = stack.pop() {
        if !item.is_submenu() && !item.children.is_empty() {
            warn!(id = %item.id, label = %item.label, kind = ?item.kind, "Non-submenu item has children");
            return Err(MenuError::LeafWithChildren {
                id: item.id.clone(),
            });
        }
        stack.extend(item.children.iter());
    }
    Ok(())
}

/// Iterator returned by [`Menu::descendants`].
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    menu: &'a Menu,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(entry) = self.menu.get(node) {
            self.stack.extend(entry.children().iter().rev());
        }
        Some(node)
    }
}
