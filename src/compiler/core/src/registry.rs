/* src/compiler/core/src/registry.rs */

//! Route registry: a prefix tree over path key segments.
//!
//! Every declared route lands in one of four slots of the node its static
//! and dynamic prefix leads to: the exact slot, the catch-all slot (the
//! first `*` segment ends the walk), or the external-override slot (`\`).

use std::fmt;

use crate::errors::CompileError;
use crate::route::{Endpoint, Route};
use crate::segment::{Segment, misplaced_catch_all, parse_pattern};

/// Path component that addresses the external-override slot.
pub const EXTERNAL_OVERRIDE: &str = "\\";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
  Route(Route),
  /// Claimed by out-of-band generation, compiled to `SKIP`.
  Reserved,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatcherNode {
  exact: Option<Slot>,
  dynamic_child: Option<Box<MatcherNode>>,
  catch_all: Option<Slot>,
  external_override: Option<Slot>,
  /// Insertion ordered.
  static_children: Vec<(String, MatcherNode)>,
}

impl MatcherNode {
  pub fn exact(&self) -> Option<&Slot> {
    self.exact.as_ref()
  }

  pub fn dynamic_child(&self) -> Option<&MatcherNode> {
    self.dynamic_child.as_deref()
  }

  pub fn catch_all(&self) -> Option<&Slot> {
    self.catch_all.as_ref()
  }

  pub fn external_override(&self) -> Option<&Slot> {
    self.external_override.as_ref()
  }

  pub fn static_children(&self) -> impl Iterator<Item = (&str, &MatcherNode)> {
    self.static_children.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn static_child(&self, literal: &str) -> Option<&MatcherNode> {
    self.static_children.iter().find(|(k, _)| k == literal).map(|(_, v)| v)
  }

  fn static_child_mut(&mut self, literal: &str) -> &mut MatcherNode {
    let pos = match self.static_children.iter().position(|(k, _)| k == literal) {
      Some(pos) => pos,
      None => {
        self.static_children.push((literal.to_string(), MatcherNode::default()));
        self.static_children.len() - 1
      }
    };
    &mut self.static_children[pos].1
  }
}

/// Non-fatal: a later declaration replaced a different value in the same slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overwrite {
  pub path_key: String,
  pub replaced_reservation: bool,
}

impl fmt::Display for Overwrite {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let what = if self.replaced_reservation { "reserved path" } else { "route" };
    write!(f, "{what} {} declared more than once, the last declaration wins", self.path_key)
  }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
  root: MatcherNode,
  warnings: Vec<Overwrite>,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a registry from `(path_key, endpoint)` pairs in declaration order.
  pub fn build<K, I>(entries: I) -> Result<Self, CompileError>
  where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, Endpoint)>,
  {
    let mut registry = Self::new();
    for (key, endpoint) in entries {
      registry.insert(key.as_ref(), endpoint)?;
    }
    Ok(registry)
  }

  pub fn insert(&mut self, path_key: &str, endpoint: Endpoint) -> Result<(), CompileError> {
    self.write(path_key, Slot::Route(endpoint.into_route()))
  }

  /// Mark paths as claimed elsewhere.
  pub fn reserve<K: AsRef<str>>(
    &mut self,
    path_keys: impl IntoIterator<Item = K>,
  ) -> Result<(), CompileError> {
    for key in path_keys {
      self.write(key.as_ref(), Slot::Reserved)?;
    }
    Ok(())
  }

  pub fn root(&self) -> &MatcherNode {
    &self.root
  }

  pub fn warnings(&self) -> &[Overwrite] {
    &self.warnings
  }

  fn write(&mut self, path_key: &str, value: Slot) -> Result<(), CompileError> {
    let slot = slot_mut(&mut self.root, path_key)?;
    if let Some(previous) = slot.as_ref()
      && *previous != value
    {
      self.warnings.push(Overwrite {
        path_key: path_key.to_string(),
        replaced_reservation: matches!(previous, Slot::Reserved),
      });
    }
    *slot = Some(value);
    Ok(())
  }
}

/// Walk (and grow) the tree to the slot a path key addresses.
fn slot_mut<'a>(
  root: &'a mut MatcherNode,
  path_key: &str,
) -> Result<&'a mut Option<Slot>, CompileError> {
  let segments = parse_pattern(path_key);
  if misplaced_catch_all(&segments).is_some() {
    return Err(CompileError::malformed(path_key, "catch-all must be the last segment"));
  }

  let last = segments.len().saturating_sub(1);
  let mut node = root;
  for (i, segment) in segments.into_iter().enumerate() {
    match segment {
      Segment::CatchAll(_) => return Ok(&mut node.catch_all),
      Segment::Static(EXTERNAL_OVERRIDE) => {
        if i != last {
          let reason = "external override must be the last segment";
          return Err(CompileError::malformed(path_key, reason));
        }
        return Ok(&mut node.external_override);
      }
      Segment::Static("") => return Err(CompileError::malformed(path_key, "empty path segment")),
      Segment::Static(literal) => node = node.static_child_mut(literal),
      Segment::Dynamic(_) => node = node.dynamic_child.get_or_insert_with(Box::default).as_mut(),
    }
  }
  Ok(&mut node.exact)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::route::{Page, RouteKind};

  fn page(path: &str) -> Endpoint {
    Endpoint::Page(Page::new(path, path.trim_matches('/')))
  }

  fn route_at<'a>(slot: Option<&'a Slot>) -> &'a Route {
    match slot {
      Some(Slot::Route(route)) => route,
      other => panic!("expected route slot, got {other:?}"),
    }
  }

  #[test]
  fn nests_static_and_dynamic_segments() {
    let registry =
      Registry::build([("/users/:id/", page("/users/:id/")), ("/users/", page("/users/"))]).unwrap();
    let users = registry.root().static_child("users").unwrap();
    assert_eq!(route_at(users.exact()).segment.internal_path, "users");
    let id = users.dynamic_child().unwrap();
    assert_eq!(route_at(id.exact()).segment.internal_path, "users/:id");
    assert_eq!(route_at(id.exact()).kind, RouteKind::Next);
  }

  #[test]
  fn root_key_targets_root_exact_slot() {
    let registry = Registry::build([("/", page("/"))]).unwrap();
    assert!(registry.root().exact().is_some());
  }

  #[test]
  fn catch_all_truncates_walk() {
    let registry = Registry::build([("/blog/*slug/", page("/blog/*slug/"))]).unwrap();
    let blog = registry.root().static_child("blog").unwrap();
    assert!(blog.catch_all().is_some());
    assert!(blog.exact().is_none());
    assert_eq!(blog.static_children().count(), 0);
  }

  #[test]
  fn external_override_slot() {
    let registry = Registry::build([("/docs/\\/", page("/docs/"))]).unwrap();
    let docs = registry.root().static_child("docs").unwrap();
    assert!(docs.external_override().is_some());
    assert!(docs.static_child(EXTERNAL_OVERRIDE).is_none());
  }

  #[test]
  fn static_children_keep_insertion_order() {
    let registry =
      Registry::build([("/b/", page("/b/")), ("/a/", page("/a/")), ("/c/", page("/c/"))]).unwrap();
    let keys: Vec<&str> = registry.root().static_children().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
  }

  #[test]
  fn reserve_marks_slots() {
    let mut registry = Registry::new();
    registry.reserve(["/static/", "/blog/*slug/"]).unwrap();
    assert_eq!(registry.root().static_child("static").unwrap().exact(), Some(&Slot::Reserved));
    assert_eq!(registry.root().static_child("blog").unwrap().catch_all(), Some(&Slot::Reserved));
  }

  #[test]
  fn identical_writes_are_idempotent() {
    let mut registry = Registry::new();
    registry.insert("/a/", page("/a/")).unwrap();
    registry.insert("/a/", page("/a/")).unwrap();
    registry.reserve(["/b/", "/b/"]).unwrap();
    assert!(registry.warnings().is_empty());
    assert_eq!(registry.root().static_children().count(), 2);
  }

  #[test]
  fn last_write_wins_with_warning() {
    let mut registry = Registry::new();
    registry.reserve(["/a/"]).unwrap();
    registry.insert("/a/", page("/a/")).unwrap();
    assert!(matches!(registry.root().static_child("a").unwrap().exact(), Some(Slot::Route(_))));
    assert_eq!(
      registry.warnings(),
      &[Overwrite { path_key: "/a/".to_string(), replaced_reservation: true }]
    );

    registry.reserve(["/a/"]).unwrap();
    assert_eq!(registry.root().static_child("a").unwrap().exact(), Some(&Slot::Reserved));
    assert_eq!(registry.warnings().len(), 2);
    assert!(!registry.warnings()[1].replaced_reservation);
  }

  #[test]
  fn writes_never_remove_siblings() {
    let mut registry = Registry::new();
    registry.insert("/a/x/", page("/a/x/")).unwrap();
    registry.insert("/a/", page("/a/")).unwrap();
    registry.reserve(["/a/*rest/"]).unwrap();
    let a = registry.root().static_child("a").unwrap();
    assert!(a.exact().is_some());
    assert!(a.static_child("x").unwrap().exact().is_some());
    assert_eq!(a.catch_all(), Some(&Slot::Reserved));
  }

  #[test]
  fn rejects_inner_catch_all() {
    let err = Registry::build([("/a/*rest/b/", page("/a/*rest/b/"))]).unwrap_err();
    assert!(matches!(err, CompileError::MalformedPattern { .. }));
  }

  #[test]
  fn rejects_inner_external_override() {
    let mut registry = Registry::new();
    assert!(registry.reserve(["/\\/a/"]).is_err());
  }

  #[test]
  fn rejects_empty_segment() {
    assert!(Registry::build([("/a//b/", page("/a//b/"))]).is_err());
  }

  #[test]
  fn overwrite_display() {
    let w = Overwrite { path_key: "/a/".to_string(), replaced_reservation: false };
    assert_eq!(w.to_string(), "route /a/ declared more than once, the last declaration wins");
  }
}
