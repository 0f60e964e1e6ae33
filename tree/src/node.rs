use std::fmt::{self, Display, Formatter};

use crate::{Accelerator, MenuItem, MenuKind, Role};

/// Handle to a node inside a [`Menu`](crate::Menu).
///
/// Two handles are equal exactly when they denote the same node, regardless
/// of the node's `id` string. Handles are never recycled: once a node is
/// removed its handle stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node placed in a menu tree.
///
/// Attributes are public and may be edited through
/// [`Menu::get_mut`](crate::Menu::get_mut). Structure (`kind`, `parent`,
/// `children`) only changes through the structural operations on
/// [`Menu`](crate::Menu).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: String,
    pub label: String,
    pub role: Role,
    pub accelerator: Option<Accelerator>,
    pub disabled: bool,
    pub hidden: bool,
    pub checked: bool,
    kind: MenuKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl MenuNode {
    pub fn kind(&self) -> MenuKind {
        self.kind
    }

    /// The owning submenu, or `None` for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_submenu(&self) -> bool {
        self.kind == MenuKind::Submenu
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }

    /// Splits an item into a childless node and the items still to place.
    pub(crate) fn from_item(item: MenuItem, parent: Option<NodeId>) -> (Self, Vec<MenuItem>) {
        let MenuItem {
            id,
            label,
            role,
            accelerator,
            kind,
            disabled,
            hidden,
            checked,
            children,
        } = item;
        let node = MenuNode {
            id,
            label,
            role,
            accelerator,
            disabled,
            hidden,
            checked,
            kind,
            parent,
            children: Vec::with_capacity(children.len()),
        };
        (node, children)
    }

    pub(crate) fn to_item(&self, children: Vec<MenuItem>) -> MenuItem {
        MenuItem {
            id: self.id.clone(),
            label: self.label.clone(),
            role: self.role,
            accelerator: self.accelerator.clone(),
            kind: self.kind,
            disabled: self.disabled,
            hidden: self.hidden,
            checked: self.checked,
            children,
        }
    }

    pub(crate) fn into_item(self, children: Vec<MenuItem>) -> MenuItem {
        let MenuNode {
            id,
            label,
            role,
            accelerator,
            disabled,
            hidden,
            checked,
            kind,
            parent: _,
            children: _,
        } = self;
        MenuItem {
            id,
            label,
            role,
            accelerator,
            kind,
            disabled,
            hidden,
            checked,
            children,
        }
    }
}
