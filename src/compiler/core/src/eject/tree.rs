/* src/compiler/core/src/eject/tree.rs */

use crate::branch::{Branch, SwitchCase};
use crate::errors::CompileError;
use crate::registry::{MatcherNode, Slot};

use super::chain::{Bindings, eject_route};

/// Lower a registry node into a `SWITCH` on the request segment at `depth`.
pub fn eject_node(node: &MatcherNode, depth: usize) -> Result<Branch, CompileError> {
  // An explicit override bypasses every sibling.
  if let Some(slot) = node.external_override() {
    return eject_slot(slot);
  }

  let exact = match node.exact() {
    Some(slot) => eject_slot(slot)?,
    None => Branch::NotFound,
  };
  let mut cases = vec![SwitchCase { matches: String::new(), then: exact }];
  for (literal, child) in node.static_children() {
    cases.push(SwitchCase { matches: literal.to_string(), then: eject_node(child, depth + 1)? });
  }

  let default_case = match node.dynamic_child() {
    Some(child) => eject_node(child, depth + 1)?,
    None => Branch::NotFound,
  };
  let catch_all = node.catch_all().map(eject_slot).transpose()?.map(Box::new);

  Ok(Branch::Switch { index: depth, cases, default_case: Box::new(default_case), catch_all })
}

pub fn eject_slot(slot: &Slot) -> Result<Branch, CompileError> {
  match slot {
    Slot::Reserved => Ok(Branch::Skip),
    Slot::Route(route) => eject_route(route, Bindings::new()),
  }
}
