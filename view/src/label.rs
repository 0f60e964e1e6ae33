use menu_tree::{MenuKind, MenuNode, Role};

const SEPARATOR: &str = "────────";

/// One-line description of a node: check mark, label, id, accelerator, role
/// and flags.
pub fn node_label(node: &MenuNode) -> String {
    let mut label = match node.kind() {
        MenuKind::Separator => SEPARATOR.to_owned(),
        MenuKind::Checkbox => format!("[{}] {}", mark(node.checked, 'x'), node.label),
        MenuKind::Radio => format!("({}) {}", mark(node.checked, '*'), node.label),
        MenuKind::Text | MenuKind::Submenu => node.label.clone(),
    };

    if !node.id.is_empty() {
        label.push_str(&format!(" #{}", node.id));
    }
    if let Some(accelerator) = &node.accelerator {
        label.push_str(&format!(" <{accelerator}>"));
    }
    match node.role {
        Role::None => {}
        role => label.push_str(&format!(" ({role:?})")),
    }
    if node.disabled {
        label.push_str(" [disabled]");
    }
    if node.hidden {
        label.push_str(" [hidden]");
    }
    label
}

fn mark(checked: bool, on: char) -> char {
    if checked { on } else { ' ' }
}
