//! Read-only text outlines of menu trees, for logs and the command line.

mod label;
mod outline;

pub use crate::label::*;
pub use crate::outline::*;
