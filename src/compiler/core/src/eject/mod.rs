/* src/compiler/core/src/eject/mod.rs */

//! Ejection: registry -> decision tree.

mod chain;
mod tree;


pub use chain::{Bindings, eject_page, eject_route};
pub use tree::{eject_node, eject_slot};

use crate::branch::Branch;
use crate::errors::CompileError;
use crate::registry::Registry;

/// Lower a whole registry, starting at request segment 0.
pub fn eject(registry: &Registry) -> Result<Branch, CompileError> {
  eject_node(registry.root(), 0)
}
