use serde::{Deserialize, Serialize};

use crate::Accelerator;

/// Structural category of a menu entry.
///
/// Only [`MenuKind::Submenu`] may own children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    #[default]
    Text,
    Separator,
    Checkbox,
    Radio,
    Submenu,
}

/// Predefined menu role.
///
/// A platform layer may replace a node carrying a role with its native
/// equivalent (e.g. the macOS "Edit" menu). Orthogonal to structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    None,
    AppMenu,
    EditMenu,
    WindowMenu,
}

impl Role {
    pub fn is_none(&self) -> bool {
        matches!(self, Role::None)
    }
}

/// A detached menu subtree.
///
/// This is the owned, nested form of a menu entry: it has no parent and
/// cannot be in two places at once. Inserting it into a [`Menu`](crate::Menu)
/// moves it into the arena and links every child to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Role::is_none")]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accelerator: Option<Accelerator>,
    #[serde(default)]
    pub kind: MenuKind,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Only meaningful for checkbox and radio items.
    #[serde(default, skip_serializing_if = "is_false")]
    pub checked: bool,
    /// Only meaningful for submenus.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl MenuItem {
    pub fn text(
        label: impl Into<String>,
        id: impl Into<String>,
        accelerator: Option<Accelerator>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            accelerator,
            kind: MenuKind::Text,
            ..Default::default()
        }
    }

    pub fn separator() -> Self {
        Self {
            kind: MenuKind::Separator,
            ..Default::default()
        }
    }

    pub fn radio(
        label: impl Into<String>,
        id: impl Into<String>,
        selected: bool,
        accelerator: Option<Accelerator>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            accelerator,
            kind: MenuKind::Radio,
            checked: selected,
            ..Default::default()
        }
    }

    pub fn checkbox(
        label: impl Into<String>,
        id: impl Into<String>,
        checked: bool,
        accelerator: Option<Accelerator>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            accelerator,
            kind: MenuKind::Checkbox,
            checked,
            ..Default::default()
        }
    }

    pub fn submenu(label: impl Into<String>, children: Vec<MenuItem>) -> Self {
        Self {
            label: label.into(),
            kind: MenuKind::Submenu,
            children,
            ..Default::default()
        }
    }

    pub fn submenu_with_id(
        label: impl Into<String>,
        id: impl Into<String>,
        children: Vec<MenuItem>,
    ) -> Self {
        Self {
            id: id.into(),
            ..Self::submenu(label, children)
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn is_submenu(&self) -> bool {
        self.kind == MenuKind::Submenu
    }

    /// Total number of entries in this subtree, including itself.
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(item) = stack.pop() {
            count += 1;
            stack.extend(item.children.iter());
        }
        count
    }
}
