//! Ordered menu trees.
//!
//! A [`Menu`] owns menu nodes in an arena and keeps every node's parent link
//! in step with its owner's child list. New entries are built as detached
//! [`MenuItem`]s and moved in with the structural operations on [`Menu`].

mod accelerator;
mod item;
mod menu;
mod node;

pub use crate::accelerator::*;
pub use crate::item::*;
pub use crate::menu::*;
pub use crate::node::*;
